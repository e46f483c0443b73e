use std::sync::Arc;
use dir_sweeper::logger::init_logger;
use dir_sweeper::sweeper::DirectorySweeper;
use dir_sweeper::Config;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    // 初始化日志
    init_logger(&config.log.filter);

    let policy = config.policy()?;
    let sweeper = Arc::new(DirectorySweeper::local());

    if config.sweeper.run_once {
        info!("Sweeping {:?} once, max age {:?}", policy.directory, policy.max_age);
        if let Err(e) = sweeper.sweep(&policy.directory, policy.max_age).await {
            error!("Sweep failed: {}", e);
            return Err(e.into());
        }
        info!("Sweep complete");
        return Ok(());
    }

    let handle = sweeper.start(policy)?;

    // 等待关闭信号
    wait_for_shutdown().await;

    info!("Shutting down...");
    handle.abort();
    info!("Shutdown complete");

    Ok(())
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}

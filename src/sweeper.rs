use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use crate::error::{Result, SweepError};
use crate::fs::{DirectoryEntry, EntryMetadata, LocalFs, SweepFs};

#[derive(Debug, Clone)]
pub struct SweepPolicy {
    pub directory: PathBuf,
    pub max_age: Duration,
    pub interval: Duration,
}

impl SweepPolicy {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            max_age: Duration::from_secs(86400), // 24 hours
            interval: Duration::from_secs(3600), // 1 hour
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// 按年龄清理目录下的直接子项
#[derive(Debug, Default)]
pub struct DirectorySweeper<F = LocalFs> {
    fs: F,
}

impl DirectorySweeper<LocalFs> {
    pub fn local() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl<F: SweepFs> DirectorySweeper<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// 删除 `directory` 下变更时间早于 `now - max_age` 的子项
    pub async fn sweep<P: AsRef<Path>>(&self, directory: P, max_age: Duration) -> Result<()> {
        match SystemTime::now().checked_sub(max_age) {
            Some(cutoff) => self.sweep_before(directory, cutoff).await,
            None => {
                // 截止时间超出时钟范围，不会有更早的条目，但目录仍需可读
                let directory = absolute_dir(directory.as_ref())?;
                debug!("Max age {:?} predates the clock, nothing to remove in {:?}", max_age, directory);
                self.fs.list(&directory).await.map(|_| ())
            }
        }
    }

    /// 删除变更时间严格早于 `cutoff` 的子项，按列出顺序逐个处理
    pub async fn sweep_before<P: AsRef<Path>>(&self, directory: P, cutoff: SystemTime) -> Result<()> {
        let directory = absolute_dir(directory.as_ref())?;
        let now = SystemTime::now();
        debug!(
            "Sweeping {:?}, cutoff {}",
            directory,
            DateTime::<Utc>::from(cutoff).to_rfc3339()
        );

        let names = self.fs.list(&directory).await?;
        let total = names.len();
        let mut removed_count = 0;

        for name in names {
            let DirectoryEntry { name, path } = DirectoryEntry::resolve(&directory, name);
            let changed_at = self.fs.change_time(&path).await?;
            let metadata = EntryMetadata::new(path, changed_at);

            if !metadata.is_older_than(cutoff) {
                continue;
            }

            if self.fs.remove(&metadata.path).await? {
                removed_count += 1;
                debug!(
                    "Removed {:?} (changed at {}, age {:?})",
                    name,
                    metadata.changed_at_utc().to_rfc3339(),
                    metadata.age(now)
                );
            } else {
                debug!("{:?} already gone", name);
            }
        }

        debug!("Sweep of {:?} done. Removed {} of {} entries", directory, removed_count, total);
        Ok(())
    }
}

impl<F: SweepFs + 'static> DirectorySweeper<F> {
    /// 启动周期清理任务，单次失败只记录日志
    pub fn start(self: Arc<Self>, policy: SweepPolicy) -> Result<JoinHandle<()>> {
        if policy.interval.is_zero() {
            return Err(SweepError::Config("sweep interval must be greater than 0".into()));
        }

        info!(
            "Starting sweeper for {:?}: max age {:?}, interval {:?}",
            policy.directory, policy.max_age, policy.interval
        );

        Ok(tokio::spawn(async move {
            loop {
                debug!("Running scheduled sweep");
                match self.sweep(&policy.directory, policy.max_age).await {
                    Ok(()) => debug!("Sweep completed successfully"),
                    Err(e) => warn!("Sweep failed: {}", e),
                }
                tokio::time::sleep(policy.interval).await;
            }
        }))
    }
}

/// 相对路径按当前工作目录补全，不访问文件系统
fn absolute_dir(directory: &Path) -> Result<PathBuf> {
    std::path::absolute(directory).map_err(|e| SweepError::io(directory, e))
}

/// 用本地文件系统清理旧文件
pub async fn sweep<P: AsRef<Path>>(directory: P, max_age: Duration) -> Result<()> {
    DirectorySweeper::local().sweep(directory, max_age).await
}

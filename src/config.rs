use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::{Result, SweepError};
use crate::sweeper::SweepPolicy;
use crate::utils::{to_boolean, to_secs};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sweeper: SweeperConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweeperConfig {
    pub directory: PathBuf,
    pub max_age_secs: u64,
    pub interval_secs: u64,
    pub run_once: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            directory: "./tmp".into(),
            max_age_secs: 86400, // 24 hours
            interval_secs: 3600, // 1 hour
            run_once: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // 首先尝试从配置文件加载，否则使用默认配置
        let mut config = match std::env::var("CONFIG_PATH") {
            Ok(config_path) => Self::from_file(&config_path)?,
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 按扩展名选择格式：`.json` 用 JSON，其它按 TOML 解析
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SweepError::io(path, e))?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&content)
                .map_err(|e| SweepError::Config(format!("{}: {}", path.display(), e)))
        } else {
            toml::from_str(&content)
                .map_err(|e| SweepError::Config(format!("{}: {}", path.display(), e)))
        }
    }

    /// 环境变量覆盖，无法解析的数值保持原值
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("SWEEP_DIR").filter(|d| !d.is_empty()) {
            self.sweeper.directory = dir.into();
        }
        if let Some(secs) = lookup("SWEEP_MAX_AGE_SECS").as_deref().and_then(to_secs) {
            self.sweeper.max_age_secs = secs;
        }
        if let Some(secs) = lookup("SWEEP_INTERVAL_SECS").as_deref().and_then(to_secs) {
            self.sweeper.interval_secs = secs;
        }
        if let Some(once) = lookup("SWEEP_ONCE") {
            self.sweeper.run_once = to_boolean(&once);
        }
        if let Some(filter) = lookup("SWEEP_LOG").filter(|f| !f.is_empty()) {
            self.log.filter = filter;
        }
    }

    pub fn policy(&self) -> Result<SweepPolicy> {
        if self.sweeper.interval_secs == 0 && !self.sweeper.run_once {
            return Err(SweepError::Config("interval_secs must be greater than 0".into()));
        }
        Ok(SweepPolicy::new(&self.sweeper.directory)
            .with_max_age(Duration::from_secs(self.sweeper.max_age_secs))
            .with_interval(Duration::from_secs(self.sweeper.interval_secs)))
    }
}

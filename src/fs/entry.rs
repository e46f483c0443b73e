use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// 目录下的一个子项，名字按被清理目录解析为完整路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: OsString,
    pub path: PathBuf,
}

impl DirectoryEntry {
    pub fn resolve<P: AsRef<Path>>(dir: P, name: impl Into<OsString>) -> Self {
        let name = name.into();
        let path = dir.as_ref().join(&name);
        Self { name, path }
    }
}

/// 清理时读取的状态信息，读取后可能立即过时
#[derive(Debug, Clone)]
pub struct EntryMetadata {
    pub path: PathBuf,
    pub changed_at: SystemTime,
}

impl EntryMetadata {
    pub fn new(path: PathBuf, changed_at: SystemTime) -> Self {
        Self { path, changed_at }
    }

    pub fn is_older_than(&self, cutoff: SystemTime) -> bool {
        self.changed_at < cutoff
    }

    /// 时间戳在 `now` 之后时返回零
    pub fn age(&self, now: SystemTime) -> Duration {
        now.duration_since(self.changed_at).unwrap_or_default()
    }

    pub fn changed_at_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.changed_at)
    }
}

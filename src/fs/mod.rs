use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::time::SystemTime;
use crate::error::Result;

mod entry;
mod local;

pub use entry::{DirectoryEntry, EntryMetadata};
pub use local::{change_time, exists, list_names, remove, LocalFs};

/// 清理器依赖的文件系统能力
#[async_trait]
pub trait SweepFs: Send + Sync {
    /// 列出目录的直接子项名称（不含 '.' 和 '..'，不递归）
    async fn list(&self, dir: &Path) -> Result<Vec<OsString>>;

    /// 读取状态变更时间（unix 上为 ctime）
    async fn change_time(&self, path: &Path) -> Result<SystemTime>;

    /// 删除文件或目录树，目标不存在时返回 false
    async fn remove(&self, path: &Path) -> Result<bool>;
}

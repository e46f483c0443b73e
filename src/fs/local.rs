use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;
use tracing::debug;
use crate::error::{Result, SweepError};
use super::SweepFs;

/// 基于 tokio::fs 的本地文件系统实现
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SweepFs for LocalFs {
    async fn list(&self, dir: &Path) -> Result<Vec<OsString>> {
        list_names(dir).await
    }

    async fn change_time(&self, path: &Path) -> Result<SystemTime> {
        change_time(path).await
    }

    async fn remove(&self, path: &Path) -> Result<bool> {
        remove(path).await
    }
}

/// 获取文件夹下的所有文件和文件夹名称（不包含'.'和'..'）
pub async fn list_names<P: AsRef<Path>>(dir: P) -> Result<Vec<OsString>> {
    let dir = dir.as_ref();
    let mut read_dir = fs::read_dir(dir).await
        .map_err(|e| SweepError::io(dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = read_dir.next_entry().await
        .map_err(|e| SweepError::io(dir, e))?
    {
        names.push(entry.file_name());
    }
    Ok(names)
}

/// 读取状态变更时间，符号链接会被跟随
pub async fn change_time<P: AsRef<Path>>(path: P) -> Result<SystemTime> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).await
        .map_err(|e| SweepError::io(path, e))?;
    metadata_change_time(&metadata).map_err(|e| SweepError::io(path, e))
}

/// 删除文件或目录，如果文件不存在返回 false，成功删除返回 true
///
/// 只有"不存在"会被当作无操作；权限不足等其他错误照常返回。
pub async fn remove<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    let metadata = match fs::symlink_metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Nothing to remove at {:?}", path);
            return Ok(false);
        }
        Err(e) => return Err(SweepError::io(path, e)),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match removed {
        Ok(()) => Ok(true),
        // 探测之后被别人删掉了
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{:?} vanished before removal", path);
            Ok(false)
        }
        Err(e) => Err(SweepError::io(path, e)),
    }
}

/// 检查文件是否存在
pub async fn exists<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    match fs::symlink_metadata(path).await {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SweepError::io(path, e)),
    }
}

#[cfg(unix)]
fn metadata_change_time(metadata: &std::fs::Metadata) -> io::Result<SystemTime> {
    use std::os::unix::fs::MetadataExt;

    ctime_to_system_time(metadata.ctime(), metadata.ctime_nsec()).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "change time out of range")
    })
}

#[cfg(unix)]
fn ctime_to_system_time(secs: i64, nsec: i64) -> Option<SystemTime> {
    use std::time::{Duration, UNIX_EPOCH};

    let nanos = Duration::from_nanos(u64::try_from(nsec).ok()?);
    let base = if secs >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(secs.unsigned_abs()))?
    } else {
        UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))?
    };
    base.checked_add(nanos)
}

#[cfg(not(unix))]
fn metadata_change_time(metadata: &std::fs::Metadata) -> io::Result<SystemTime> {
    metadata.created().or_else(|_| metadata.modified())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::test;

    #[test]
    async fn test_remove_file_then_absent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, b"data").await.unwrap();

        assert!(remove(&file).await.unwrap());
        assert!(!remove(&file).await.unwrap());
        assert!(!exists(&file).await.unwrap());
    }

    #[test]
    async fn test_remove_directory_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path().join("tree");
        fs::create_dir_all(dir.join("nested/deeper")).await.unwrap();
        fs::write(dir.join("nested/deeper/f"), b"x").await.unwrap();

        assert!(remove(&dir).await.unwrap());
        assert!(!exists(&dir).await.unwrap());
    }

    #[cfg(unix)]
    #[test]
    async fn test_remove_symlink_keeps_target() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).await.unwrap();
        fs::write(target.join("keep"), b"x").await.unwrap();
        let link = temp_dir.path().join("link");
        fs::symlink(&target, &link).await.unwrap();

        assert!(remove(&link).await.unwrap());
        assert!(exists(target.join("keep")).await.unwrap());
    }

    #[cfg(unix)]
    #[test]
    async fn test_remove_propagates_errors_other_than_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, b"x").await.unwrap();
        let under_file = file.join("child");

        let err = remove(&under_file).await.unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!(err.path(), Some(under_file.as_path()));

        let err = exists(&under_file).await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(exists(&file).await.unwrap());
    }

    #[cfg(unix)]
    #[test]
    async fn test_ctime_conversion_is_total() {
        use std::time::{Duration, UNIX_EPOCH};

        assert_eq!(
            ctime_to_system_time(10, 5),
            Some(UNIX_EPOCH + Duration::from_secs(10) + Duration::from_nanos(5))
        );
        assert_eq!(
            ctime_to_system_time(-10, 0),
            UNIX_EPOCH.checked_sub(Duration::from_secs(10))
        );
        assert_eq!(ctime_to_system_time(0, -1), None);
        assert_eq!(ctime_to_system_time(i64::MAX, 1_999_999_999), None);
    }

    #[test]
    async fn test_list_names_is_not_recursive() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("sub/inner")).await.unwrap();
        fs::write(temp_dir.path().join("top.txt"), b"x").await.unwrap();

        let mut names = list_names(temp_dir.path()).await.unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("sub"), OsString::from("top.txt")]);
    }

    #[test]
    async fn test_list_missing_dir_reports_path() {
        let err = list_names("/no/such/dir").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.path(), Some(Path::new("/no/such/dir")));
    }

    #[test]
    async fn test_change_time_of_fresh_file_is_recent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("fresh");
        fs::write(&file, b"x").await.unwrap();

        let changed_at = change_time(&file).await.unwrap();
        let age = SystemTime::now().duration_since(changed_at).unwrap_or_default();
        assert!(age < std::time::Duration::from_secs(60));
    }

    #[test]
    async fn test_change_time_missing_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = change_time(temp_dir.path().join("gone")).await.unwrap_err();
        assert!(err.is_not_found());
    }
}

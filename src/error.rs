use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SweepError {
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        SweepError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 路径不存在时为 true
    pub fn is_not_found(&self) -> bool {
        matches!(self, SweepError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SweepError::Io { path, .. } => Some(path),
            SweepError::Config(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;

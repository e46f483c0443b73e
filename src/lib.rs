pub mod config;
pub mod error;
pub mod fs;
pub mod logger;
pub mod sweeper;
pub mod utils;

pub use config::Config;
pub use error::{Result, SweepError};

pub mod prelude {
    pub use crate::error::{Result, SweepError};
    pub use crate::fs::{LocalFs, SweepFs};
    pub use crate::sweeper::{sweep, DirectorySweeper, SweepPolicy};
}

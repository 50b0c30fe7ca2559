mod error;
mod manager;
pub mod policy;

pub use error::{BackupError, Result};
pub use manager::{BackupManager, BackupPolicy, RunSummary};

pub mod config;
pub mod constants;

pub use config::{AwsConfig, SnapkeepConfig, load_config};

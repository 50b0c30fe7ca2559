use snapkeep_backup::BackupPolicy;
use snapkeep_config::{SnapkeepConfig, constants};
use std::path::Path;

pub async fn load() -> anyhow::Result<SnapkeepConfig> {
    let path = std::env::var("SNAPKEEP_CONFIG")
        .unwrap_or_else(|_| constants::DEFAULT_CONFIG_PATH.into());

    let mut config = snapkeep_config::load_config(Path::new(&path)).await?;

    if std::env::var("SNAPKEEP_DRY_RUN")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
    {
        config.dry_run = true;
    }

    Ok(config)
}

pub fn backup_policy(config: &SnapkeepConfig) -> BackupPolicy {
    BackupPolicy {
        default_retention_days: config.default_retention_days,
        min_retention_count: config.min_retention_count,
        dry_run: config.dry_run,
    }
}

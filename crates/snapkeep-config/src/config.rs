use crate::constants;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SnapkeepConfig {
    #[serde(default = "default_retention_days")]
    pub default_retention_days: u32,

    #[serde(default = "default_min_retention_count")]
    pub min_retention_count: usize,

    #[serde(default)]
    pub dry_run: bool,

    #[serde(default)]
    pub aws: AwsConfig,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AwsConfig {
    /// Falls back to the SDK's region resolution (AWS_REGION, profile) when unset.
    pub region: Option<String>,

    /// Custom EC2 endpoint, e.g. LocalStack.
    pub endpoint_url: Option<String>,
}

impl Default for SnapkeepConfig {
    fn default() -> Self {
        Self {
            default_retention_days: default_retention_days(),
            min_retention_count: default_min_retention_count(),
            dry_run: false,
            aws: AwsConfig::default(),
        }
    }
}

fn default_retention_days() -> u32 {
    constants::DEFAULT_RETENTION_DAYS
}

fn default_min_retention_count() -> usize {
    constants::MIN_RETENTION_COUNT
}

/// Reads the run configuration, returning defaults when the file does not exist.
pub async fn load_config(path: &Path) -> std::io::Result<SnapkeepConfig> {
    if !path.exists() {
        info!("No config file at {:?}, using defaults", path);
        return Ok(SnapkeepConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: SnapkeepConfig = toml::from_str(&content)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: SnapkeepConfig = toml::from_str("").unwrap();
        assert_eq!(config, SnapkeepConfig::default());
        assert_eq!(config.default_retention_days, 2);
        assert_eq!(config.min_retention_count, 1);
        assert!(!config.dry_run);
        assert!(config.aws.region.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
default_retention_days = 7
min_retention_count = 3
dry_run = true

[aws]
region = "eu-west-1"
endpoint_url = "http://localhost:4566"
"#;
        let config: SnapkeepConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_retention_days, 7);
        assert_eq!(config.min_retention_count, 3);
        assert!(config.dry_run);
        assert_eq!(config.aws.region, Some("eu-west-1".to_string()));
        assert_eq!(
            config.aws.endpoint_url,
            Some("http://localhost:4566".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_negative_retention() {
        let result: Result<SnapkeepConfig, _> = toml::from_str("default_retention_days = -1");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/snapkeep.toml"))
            .await
            .unwrap();
        assert_eq!(config, SnapkeepConfig::default());
    }
}

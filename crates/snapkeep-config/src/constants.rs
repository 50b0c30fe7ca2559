pub const SNAPSHOT_TAG: &str = "MakeSnapshot";
pub const RETENTION_TAG: &str = "Retention";
pub const DELETE_TAG: &str = "AutoDelete";
pub const NAME_TAG: &str = "Name";

/// Tag values (compared case-insensitively) that opt a resource out of backups.
pub const OPT_OUT_VALUES: [&str; 3] = ["false", "0", "none"];

pub const DELETE_TAG_ENABLED: &str = "true";

pub const RUNNING_STATE: &str = "running";

pub const DEFAULT_RETENTION_DAYS: u32 = 2;
pub const MIN_RETENTION_COUNT: usize = 1;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/snapkeep/snapkeep.toml";

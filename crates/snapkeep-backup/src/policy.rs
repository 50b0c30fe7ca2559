//! Tag-driven decisions made by the backup run.
//!
//! Tag keys are matched exactly; tag values are compared case-insensitively.

use chrono::{DateTime, TimeDelta, Utc};
use snapkeep_config::constants;
use tracing::warn;

pub fn is_opted_out(value: &str) -> bool {
    constants::OPT_OUT_VALUES
        .iter()
        .any(|v| value.eq_ignore_ascii_case(v))
}

/// Whether a resource takes part in backups given its `MakeSnapshot` tag value.
/// `absent` decides the outcome when the tag is missing: instances are excluded,
/// volumes inherit their instance's opt-in.
pub fn make_snapshot(value: Option<&str>, absent: bool) -> bool {
    match value {
        Some(v) => !is_opted_out(v),
        None => absent,
    }
}

/// Resolves a `Retention` tag value against the inherited number of days.
/// Values that are not a non-negative integer keep the inherited value.
pub fn resolve_retention_days(value: Option<&str>, inherited: u32, resource: &str) -> u32 {
    let Some(raw) = value else {
        return inherited;
    };

    match raw.trim().parse::<u32>() {
        Ok(days) => days,
        Err(e) => {
            warn!(
                "Ignoring [{}] tag value [{}] on [{}]: {}; using [{}] days",
                constants::RETENTION_TAG,
                raw,
                resource,
                e,
                inherited
            );
            inherited
        }
    }
}

pub fn auto_delete_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case(constants::DELETE_TAG_ENABLED))
}

pub fn is_expired(start_time: DateTime<Utc>, now: DateTime<Utc>, retention_days: u32) -> bool {
    now - start_time > TimeDelta::days(i64::from(retention_days))
}

/// `{instance name}.{volume id}.{UTC timestamp to the second}`
pub fn snapshot_description(instance_name: &str, volume_id: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}.{}.{}",
        instance_name,
        volume_id,
        now.format("%Y-%m-%dT%H:%M:%S")
    )
}

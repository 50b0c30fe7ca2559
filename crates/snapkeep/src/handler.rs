use chrono::{DateTime, Utc};
use serde_json::Value;
use snapkeep_backup::BackupManager;
use tracing::info;

#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Set by systemd for every unit activation, including timer-triggered ones.
    pub invocation_id: Option<String>,
    pub invoked_at: DateTime<Utc>,
}

impl InvocationContext {
    pub fn from_env() -> Self {
        Self {
            invocation_id: std::env::var("INVOCATION_ID").ok(),
            invoked_at: Utc::now(),
        }
    }
}

/// The scheduler's event payload; anything that is not JSON is kept as a string.
pub fn parse_event(raw: Option<&str>) -> Value {
    match raw {
        Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
        None => Value::Null,
    }
}

pub async fn handle(
    event: &Value,
    context: &InvocationContext,
    manager: &BackupManager,
) -> anyhow::Result<bool> {
    info!(
        "Snapshot backups started for event [{}] (invocation: {:?}, at: {})",
        event, context.invocation_id, context.invoked_at
    );

    let summary = manager.run().await?;

    info!(
        "Snapshot backups completed: {} instances, {} snapshots created, {} deleted",
        summary.instances_seen, summary.snapshots_created, summary.snapshots_deleted
    );

    Ok(true)
}

use crate::Result;
use crate::tags::Tags;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use snapkeep_config::constants;

#[async_trait]
pub trait Ec2Provider: Send + Sync {
    /// Instances carrying `tag_key` (any value) that are in the running state.
    async fn list_tagged_running_instances(&self, tag_key: &str) -> Result<Vec<Instance>>;

    async fn list_attached_volumes(&self, instance_id: &str) -> Result<Vec<Volume>>;

    async fn create_snapshot(&self, volume_id: &str, description: &str) -> Result<Snapshot>;

    async fn create_tags(&self, resource_id: &str, tags: &[(&str, &str)]) -> Result<()>;

    /// Snapshots of `volume_id` carrying `tag_key` (any value).
    async fn list_tagged_snapshots(&self, volume_id: &str, tag_key: &str)
    -> Result<Vec<Snapshot>>;

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Instance {
    pub id: String,
    pub state: String,
    pub tags: Tags,
}

impl Instance {
    /// The `Name` tag, falling back to the instance id.
    pub fn name(&self) -> &str {
        self.tags
            .get(constants::NAME_TAG)
            .map(String::as_str)
            .unwrap_or(&self.id)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Volume {
    pub id: String,
    pub instance_id: String,
    pub tags: Tags,
}

impl Volume {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: String,
    pub volume_id: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub tags: Tags,
}

impl Snapshot {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

use crate::Result;
use crate::policy;
use chrono::{DateTime, Utc};
use snapkeep_config::constants;
use snapkeep_ec2::{Ec2Provider, Instance, Volume};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupPolicy {
    pub default_retention_days: u32,
    /// Purging is skipped for a volume holding this many tracked snapshots or fewer.
    pub min_retention_count: usize,
    pub dry_run: bool,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        Self {
            default_retention_days: constants::DEFAULT_RETENTION_DAYS,
            min_retention_count: constants::MIN_RETENTION_COUNT,
            dry_run: false,
        }
    }
}

pub struct BackupManager {
    provider: Arc<dyn Ec2Provider>,
    policy: BackupPolicy,
}

impl BackupManager {
    pub fn new(provider: Arc<dyn Ec2Provider>, policy: BackupPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> &BackupPolicy {
        &self.policy
    }

    pub async fn run(&self) -> Result<RunSummary> {
        self.run_at(Utc::now()).await
    }

    /// Snapshots every opted-in volume and purges expired snapshots, using
    /// `now` for descriptions and age checks. The first API error aborts the run.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        info!(
            "Starting snapshot backups (default retention: {} days, dry run: {})",
            self.policy.default_retention_days, self.policy.dry_run
        );

        let instances = self
            .provider
            .list_tagged_running_instances(constants::SNAPSHOT_TAG)
            .await?;

        for instance in instances {
            summary.instances_seen += 1;

            if instance.state != constants::RUNNING_STATE {
                info!(
                    "Skip instance [{}]: state is [{}]",
                    instance.id, instance.state
                );
                summary.instances_skipped += 1;
                continue;
            }

            if !policy::make_snapshot(instance.tag(constants::SNAPSHOT_TAG), false) {
                info!(
                    "Skip instance [{}]: [{}] tag value is false",
                    instance.id,
                    constants::SNAPSHOT_TAG
                );
                summary.instances_skipped += 1;
                continue;
            }

            info!("Instance [{}]: [{}]", instance.id, instance.name());

            let retention_days = policy::resolve_retention_days(
                instance.tag(constants::RETENTION_TAG),
                self.policy.default_retention_days,
                &instance.id,
            );

            let volumes = self.provider.list_attached_volumes(&instance.id).await?;
            for volume in &volumes {
                self.backup_volume(&instance, volume, retention_days, now, &mut summary)
                    .await?;
            }
        }

        info!(
            "Snapshot backups complete: {} created, {} deleted, {} retained, {} instances skipped, {} volumes skipped",
            summary.snapshots_created,
            summary.snapshots_deleted,
            summary.snapshots_retained,
            summary.instances_skipped,
            summary.volumes_skipped
        );

        Ok(summary)
    }

    async fn backup_volume(
        &self,
        instance: &Instance,
        volume: &Volume,
        instance_retention_days: u32,
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        if !policy::make_snapshot(volume.tag(constants::SNAPSHOT_TAG), true) {
            info!(
                "Skip volume [{}]: [{}] tag value is false",
                volume.id,
                constants::SNAPSHOT_TAG
            );
            summary.volumes_skipped += 1;
            return Ok(());
        }

        info!("Volume [{}]", volume.id);

        let description = policy::snapshot_description(instance.name(), &volume.id, now);

        let created = if self.policy.dry_run {
            info!(
                "[dry run] Would create snapshot with description [{}]",
                description
            );
            None
        } else {
            let snapshot = self
                .provider
                .create_snapshot(&volume.id, &description)
                .await?;
            self.provider
                .create_tags(
                    &snapshot.id,
                    &[(constants::DELETE_TAG, constants::DELETE_TAG_ENABLED)],
                )
                .await?;

            info!(
                "Snapshot [{}] created with description [{}]",
                snapshot.id, description
            );
            Some(snapshot.id)
        };
        summary.snapshots_created += 1;

        let retention_days = policy::resolve_retention_days(
            volume.tag(constants::RETENTION_TAG),
            instance_retention_days,
            &volume.id,
        );

        self.purge_expired(&volume.id, created.as_deref(), retention_days, now, summary)
            .await
    }

    async fn purge_expired(
        &self,
        volume_id: &str,
        created_snapshot_id: Option<&str>,
        retention_days: u32,
        now: DateTime<Utc>,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let snapshots: Vec<_> = self
            .provider
            .list_tagged_snapshots(volume_id, constants::DELETE_TAG)
            .await?
            .into_iter()
            .filter(|s| Some(s.id.as_str()) != created_snapshot_id)
            .collect();

        if snapshots.len() <= self.policy.min_retention_count {
            info!(
                "Skip deletion of snapshots for [{}]: count [{}] <= minimum retention count [{}]",
                volume_id,
                snapshots.len(),
                self.policy.min_retention_count
            );
            summary.purges_skipped += 1;
            return Ok(());
        }

        for snapshot in &snapshots {
            if !policy::auto_delete_enabled(snapshot.tag(constants::DELETE_TAG)) {
                info!(
                    "Skip deletion of snapshot [{}]: [{}] tag value is not [\"true\"]",
                    snapshot.id,
                    constants::DELETE_TAG
                );
                summary.snapshots_retained += 1;
                continue;
            }

            if !policy::is_expired(snapshot.start_time, now, retention_days) {
                info!(
                    "Skip deletion of snapshot [{}]: still within retention period of [{}] days",
                    snapshot.id, retention_days
                );
                summary.snapshots_retained += 1;
                continue;
            }

            if self.policy.dry_run {
                info!(
                    "[dry run] Would delete snapshot [{}]: [{}]",
                    snapshot.id, snapshot.description
                );
            } else {
                info!(
                    "Delete snapshot [{}]: [{}]",
                    snapshot.id, snapshot.description
                );
                self.provider.delete_snapshot(&snapshot.id).await?;
            }
            summary.snapshots_deleted += 1;
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub instances_seen: usize,
    pub instances_skipped: usize,
    pub volumes_skipped: usize,
    pub snapshots_created: usize,
    pub snapshots_deleted: usize,
    pub snapshots_retained: usize,
    pub purges_skipped: usize,
}

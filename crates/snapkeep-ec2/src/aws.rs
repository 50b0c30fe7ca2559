use crate::provider::{Ec2Provider, Instance, Snapshot, Volume};
use crate::tags::flatten_tags;
use crate::{Error, Result};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ec2::Client;
use aws_sdk_ec2::primitives::DateTime as AwsDateTime;
use aws_sdk_ec2::types::{Filter, Tag};
use chrono::{DateTime, Utc};
use snapkeep_config::constants;
use tracing::debug;

pub struct AwsEc2Provider {
    client: Client,
}

impl AwsEc2Provider {
    /// Builds a client from the standard credential chain (environment,
    /// instance profile, etc.), optionally pinning the region and endpoint.
    pub async fn new(region: Option<String>, endpoint_url: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }

        let sdk_config = loader.load().await;

        let mut ec2_config = aws_sdk_ec2::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &endpoint_url {
            ec2_config = ec2_config.endpoint_url(endpoint_url);
        }

        Self::from_client(Client::from_conf(ec2_config.build()))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn filter(name: &str, value: &str) -> Filter {
    Filter::builder().name(name).values(value).build()
}

fn tags_of(tags: &[Tag]) -> crate::Tags {
    flatten_tags(tags.iter().map(|t| (t.key(), t.value())))
}

fn to_utc(snapshot_id: &str, start_time: Option<&AwsDateTime>) -> Result<DateTime<Utc>> {
    let start_time = start_time.ok_or_else(|| Error::MissingField {
        resource: snapshot_id.to_string(),
        field: "start time",
    })?;

    DateTime::from_timestamp(start_time.secs(), start_time.subsec_nanos())
        .ok_or_else(|| Error::InvalidTimestamp(snapshot_id.to_string()))
}

fn required(value: Option<&str>, resource: &str, field: &'static str) -> Result<String> {
    value.map(str::to_string).ok_or_else(|| Error::MissingField {
        resource: resource.to_string(),
        field,
    })
}

#[async_trait]
impl Ec2Provider for AwsEc2Provider {
    async fn list_tagged_running_instances(&self, tag_key: &str) -> Result<Vec<Instance>> {
        let mut pages = self
            .client
            .describe_instances()
            .filters(filter("tag-key", tag_key))
            .filters(filter("instance-state-name", constants::RUNNING_STATE))
            .into_paginator()
            .send();

        let mut instances = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_ec2::Error::from)?;

            for instance in page.reservations().iter().flat_map(|r| r.instances()) {
                let id = required(instance.instance_id(), "instance", "instance id")?;
                let state = instance
                    .state()
                    .and_then(|s| s.name())
                    .map(|name| name.as_str().to_string())
                    .unwrap_or_default();

                instances.push(Instance {
                    id,
                    state,
                    tags: tags_of(instance.tags()),
                });
            }
        }

        debug!("Found {} tagged running instances", instances.len());

        Ok(instances)
    }

    async fn list_attached_volumes(&self, instance_id: &str) -> Result<Vec<Volume>> {
        let mut pages = self
            .client
            .describe_volumes()
            .filters(filter("attachment.instance-id", instance_id))
            .into_paginator()
            .send();

        let mut volumes = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_ec2::Error::from)?;

            for volume in page.volumes() {
                volumes.push(Volume {
                    id: required(volume.volume_id(), instance_id, "volume id")?,
                    instance_id: instance_id.to_string(),
                    tags: tags_of(volume.tags()),
                });
            }
        }

        Ok(volumes)
    }

    async fn create_snapshot(&self, volume_id: &str, description: &str) -> Result<Snapshot> {
        let response = self
            .client
            .create_snapshot()
            .volume_id(volume_id)
            .description(description)
            .send()
            .await
            .map_err(aws_sdk_ec2::Error::from)?;

        let id = required(response.snapshot_id(), volume_id, "snapshot id")?;
        let start_time = to_utc(&id, response.start_time())?;

        Ok(Snapshot {
            volume_id: volume_id.to_string(),
            description: response.description().unwrap_or(description).to_string(),
            start_time,
            tags: tags_of(response.tags()),
            id,
        })
    }

    async fn create_tags(&self, resource_id: &str, tags: &[(&str, &str)]) -> Result<()> {
        let mut request = self.client.create_tags().resources(resource_id);
        for (key, value) in tags {
            request = request.tags(Tag::builder().key(*key).value(*value).build());
        }

        request.send().await.map_err(aws_sdk_ec2::Error::from)?;

        Ok(())
    }

    async fn list_tagged_snapshots(
        &self,
        volume_id: &str,
        tag_key: &str,
    ) -> Result<Vec<Snapshot>> {
        let mut pages = self
            .client
            .describe_snapshots()
            .owner_ids("self")
            .filters(filter("volume-id", volume_id))
            .filters(filter("tag-key", tag_key))
            .into_paginator()
            .send();

        let mut snapshots = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(aws_sdk_ec2::Error::from)?;

            for snapshot in page.snapshots() {
                let id = required(snapshot.snapshot_id(), volume_id, "snapshot id")?;
                let start_time = to_utc(&id, snapshot.start_time())?;

                snapshots.push(Snapshot {
                    volume_id: volume_id.to_string(),
                    description: snapshot.description().unwrap_or_default().to_string(),
                    start_time,
                    tags: tags_of(snapshot.tags()),
                    id,
                });
            }
        }

        Ok(snapshots)
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        self.client
            .delete_snapshot()
            .snapshot_id(snapshot_id)
            .send()
            .await
            .map_err(aws_sdk_ec2::Error::from)?;

        Ok(())
    }
}

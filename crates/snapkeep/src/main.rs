mod config;
mod handler;

use handler::InvocationContext;
use snapkeep_backup::BackupManager;
use snapkeep_ec2::AwsEc2Provider;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = config::load().await?;

    let provider = AwsEc2Provider::new(
        config.aws.region.clone(),
        config.aws.endpoint_url.clone(),
    )
    .await;
    let manager = BackupManager::new(Arc::new(provider), config::backup_policy(&config));

    let event = handler::parse_event(std::env::args().nth(1).as_deref());
    let context = InvocationContext::from_env();

    match handler::handle(&event, &context, &manager).await {
        Ok(true) => Ok(()),
        Ok(false) => anyhow::bail!("snapshot backups reported failure"),
        Err(e) => {
            tracing::error!("Snapshot backups failed: {}", e);
            Err(e)
        }
    }
}

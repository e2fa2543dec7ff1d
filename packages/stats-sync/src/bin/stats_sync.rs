// Entry point for one sync run (scheduled externally, e.g. by cron)

use anyhow::{Context, Result};
use stats_sync_core::{kernel::SyncDeps, pipeline::run_full_sync, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stats_sync_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting post stats sync");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(channel = %config.channel_id, project = %config.sheety_project, "Configuration loaded");

    let deps = SyncDeps::from_config(&config);
    let summary = run_full_sync(&deps).await.context("Sync run failed")?;

    tracing::info!(
        daily_posts = summary.daily_posts,
        monthly_posts = summary.monthly_posts,
        daily_deleted = summary.daily.deleted,
        daily_updated = summary.daily.updated,
        daily_inserted = summary.daily.inserted,
        results_deleted = summary.results.deleted,
        results_updated = summary.results.updated,
        results_inserted = summary.results.inserted,
        "Sync run complete"
    );

    Ok(())
}

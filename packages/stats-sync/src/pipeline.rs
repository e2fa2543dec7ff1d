//! One end-to-end sync run.

use anyhow::{Context, Result};

use crate::domains::collector::Collector;
use crate::domains::reconciler::{ReconcileReport, Reconciler};
use crate::kernel::SyncDeps;

/// Outcome of a sync run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub daily_posts: usize,
    pub monthly_posts: usize,
    pub daily: ReconcileReport,
    pub results: ReconcileReport,
}

/// Collect both snapshots, then reconcile both sheets.
///
/// The clock is read once so every date rule in the run sees the same moment.
/// A failure aborts the run; sheets already touched are not rolled back.
pub async fn run_full_sync(deps: &SyncDeps) -> Result<SyncSummary> {
    let now = deps.clock.now();
    tracing::info!(%now, "Starting sync run");

    let collector = Collector::from_deps(deps);
    let daily = collector.collect_daily(now).await?;
    let monthly = collector.collect_monthly(now).await?;

    let reconciler = Reconciler::from_deps(deps, now);
    let daily_report = reconciler
        .sync_daily(&daily)
        .await
        .context("Daily sheet reconciliation failed")?;
    let results_report = reconciler
        .sync_results(&monthly)
        .await
        .context("Results sheet reconciliation failed")?;

    Ok(SyncSummary {
        daily_posts: daily.len(),
        monthly_posts: monthly.len(),
        daily: daily_report,
        results: results_report,
    })
}

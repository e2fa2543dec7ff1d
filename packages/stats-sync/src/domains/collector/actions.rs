//! Collection pipeline: page the analytics API, resolve albums, trim text,
//! order chronologically and attach per-view ratios.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::time::Duration;

use super::grouping::resolve_groups;
use super::models::{PostMap, PostSnapshot, PostStats};
use super::ordering::order_chronologically;
use super::text::trim_text;
use crate::common::{daily_window, in_reporting_window, previous_month_window, RawPost, TimeWindow};
use crate::kernel::{pause, BaseAnalyticsService, SyncDeps};

/// Largest page the analytics API returns.
pub const PAGE_SIZE: u32 = 50;

/// Fetch every post published inside `window`.
///
/// Stops at the first page shorter than [`PAGE_SIZE`]. An empty first page
/// means the window holds no posts.
pub async fn fetch_window(
    analytics: &dyn BaseAnalyticsService,
    window: &TimeWindow,
    page_delay: Duration,
) -> Result<Vec<RawPost>> {
    let mut posts = Vec::new();
    let mut offset = 0u32;

    loop {
        let page = analytics
            .channel_posts(window, PAGE_SIZE, offset)
            .await
            .with_context(|| format!("Failed to fetch posts page at offset {}", offset))?;
        let received = page.len() as u32;

        tracing::debug!(offset, received, "Fetched posts page");

        if received == 0 {
            if offset == 0 {
                tracing::info!(
                    start = %window.start,
                    end = %window.end,
                    "No posts published in window"
                );
            }
            break;
        }

        posts.extend(page);
        offset += received;

        if received < PAGE_SIZE {
            break;
        }
        pause(page_delay).await;
    }

    Ok(posts)
}

/// Fetch counters for every post and compute its per-view ratios, preserving order.
pub async fn fetch_stats(
    analytics: &dyn BaseAnalyticsService,
    posts: &PostMap,
) -> Result<PostSnapshot> {
    let mut stats = Vec::with_capacity(posts.len());

    for (link, entry) in posts {
        let counters = analytics
            .post_counters(link)
            .await
            .with_context(|| format!("Failed to fetch stats for {}", link))?;
        stats.push(PostStats::from_counters(link, entry, counters)?);
    }

    Ok(stats.into_iter().collect())
}

/// Runs the collection pipeline against the analytics service.
pub struct Collector<'a> {
    analytics: &'a dyn BaseAnalyticsService,
    page_delay: Duration,
}

impl<'a> Collector<'a> {
    pub fn new(analytics: &'a dyn BaseAnalyticsService, page_delay: Duration) -> Self {
        Self {
            analytics,
            page_delay,
        }
    }

    pub fn from_deps(deps: &'a SyncDeps) -> Self {
        Self::new(deps.analytics.as_ref(), deps.pacing.page_delay)
    }

    /// Full pipeline for one window.
    pub async fn collect(&self, window: &TimeWindow) -> Result<PostSnapshot> {
        let raw = fetch_window(self.analytics, window, self.page_delay).await?;
        let raw_count = raw.len();

        let mut posts = resolve_groups(raw)?;
        trim_text(&mut posts);
        let posts = order_chronologically(posts);

        tracing::info!(
            raw = raw_count,
            posts = posts.len(),
            "Resolved posts, fetching stats"
        );

        fetch_stats(self.analytics, &posts).await
    }

    /// Posts of the last 31 days.
    pub async fn collect_daily(&self, now: NaiveDateTime) -> Result<PostSnapshot> {
        self.collect(&daily_window(now))
            .await
            .context("Daily collection failed")
    }

    /// Posts of the previous calendar month, collected only inside the reporting window.
    pub async fn collect_monthly(&self, now: NaiveDateTime) -> Result<PostSnapshot> {
        if !in_reporting_window(now) {
            tracing::info!(%now, "Outside reporting window, skipping monthly collection");
            return Ok(PostSnapshot::default());
        }

        self.collect(&previous_month_window(now))
            .await
            .context("Monthly collection failed")
    }
}

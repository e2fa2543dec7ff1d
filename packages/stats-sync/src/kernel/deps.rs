//! Sync dependencies (using traits for testability)
//!
//! This module provides the dependency container handed to the collector and
//! reconciler. All external services sit behind trait abstractions.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sheety_client::{SheetRef, SheetyClient};
use std::sync::Arc;
use std::time::Duration;
use tgstat_client::{PostsQuery, TgStatClient};

use crate::common::calendar::from_unix;
use crate::common::{PostCounters, RawPost, Sheet, TimeWindow};
use crate::config::Config;
use crate::kernel::{BaseAnalyticsService, BaseSheetStore, Clock, RowFields, SheetRow};

// =============================================================================
// TgStatClient Adapter (implements BaseAnalyticsService trait)
// =============================================================================

/// Wrapper around TgStatClient bound to a single channel
pub struct TgStatAdapter {
    client: TgStatClient,
    channel_id: String,
}

impl TgStatAdapter {
    pub fn new(client: TgStatClient, channel_id: impl Into<String>) -> Self {
        Self {
            client,
            channel_id: channel_id.into(),
        }
    }
}

#[async_trait]
impl BaseAnalyticsService for TgStatAdapter {
    async fn channel_posts(
        &self,
        window: &TimeWindow,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<RawPost>> {
        let query = PostsQuery::page(
            self.channel_id.as_str(),
            window.start_unix(),
            window.end_unix(),
            limit,
            offset,
        );
        let page = self
            .client
            .channel_posts(&query)
            .await
            .context("TGStat channel posts request failed")?;

        if page.count as usize != page.items.len() {
            tracing::debug!(
                count = page.count,
                items = page.items.len(),
                "TGStat page count differs from item count"
            );
        }

        page.items
            .into_iter()
            .map(|item| -> Result<RawPost> {
                Ok(RawPost {
                    date: from_unix(item.date)
                        .with_context(|| format!("Invalid date for {}", item.link))?,
                    link: item.link,
                    group_id: item.group_id,
                    text: item.text.unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn post_counters(&self, link: &str) -> Result<PostCounters> {
        let stat = self
            .client
            .post_stat(link)
            .await
            .with_context(|| format!("TGStat post stat request failed for {}", link))?;

        Ok(PostCounters {
            views: stat.views_count,
            shares: stat.shares_count,
            reactions: stat.reactions_count,
        })
    }
}

// =============================================================================
// SheetyClient Adapter (implements BaseSheetStore trait)
// =============================================================================

/// Wrapper around SheetyClient that implements BaseSheetStore trait
pub struct SheetyAdapter(pub SheetyClient);

impl SheetyAdapter {
    fn sheet_ref(sheet: Sheet) -> SheetRef {
        SheetRef::new(sheet.name(), sheet.record_key())
    }
}

#[async_trait]
impl BaseSheetStore for SheetyAdapter {
    async fn list_rows(&self, sheet: Sheet) -> Result<Vec<SheetRow>> {
        self.0
            .list_rows(&Self::sheet_ref(sheet))
            .await
            .with_context(|| format!("Failed to list rows of sheet {}", sheet))
    }

    async fn insert_row(&self, sheet: Sheet, fields: &RowFields) -> Result<()> {
        let row = self
            .0
            .add_row(&Self::sheet_ref(sheet), fields)
            .await
            .with_context(|| format!("Failed to insert row into sheet {}", sheet))?;
        tracing::debug!(sheet = %sheet, row_id = row.id, "Row inserted");
        Ok(())
    }

    async fn update_row(&self, sheet: Sheet, id: u64, fields: &RowFields) -> Result<()> {
        self.0
            .edit_row(&Self::sheet_ref(sheet), id, fields)
            .await
            .with_context(|| format!("Failed to update row {} of sheet {}", id, sheet))
    }

    async fn delete_row(&self, sheet: Sheet, id: u64) -> Result<()> {
        self.0
            .delete_row(&Self::sheet_ref(sheet), id)
            .await
            .with_context(|| format!("Failed to delete row {} of sheet {}", id, sheet))
    }
}

// =============================================================================
// System Clock
// =============================================================================

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

// =============================================================================
// Pacing
// =============================================================================

/// Fixed delays that keep both remote APIs under their rate limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause between analytics pages.
    pub page_delay: Duration,
    /// Pause after every mutating sheet call.
    pub mutation_delay: Duration,
}

impl Pacing {
    pub fn none() -> Self {
        Self {
            page_delay: Duration::ZERO,
            mutation_delay: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(1),
            mutation_delay: Duration::from_millis(500),
        }
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// =============================================================================
// SyncDeps
// =============================================================================

/// Dependencies of one sync run (using traits for testability)
#[derive(Clone)]
pub struct SyncDeps {
    pub analytics: Arc<dyn BaseAnalyticsService>,
    pub sheets: Arc<dyn BaseSheetStore>,
    pub clock: Arc<dyn Clock>,
    pub pacing: Pacing,
}

impl SyncDeps {
    pub fn new(
        analytics: Arc<dyn BaseAnalyticsService>,
        sheets: Arc<dyn BaseSheetStore>,
        clock: Arc<dyn Clock>,
        pacing: Pacing,
    ) -> Self {
        Self {
            analytics,
            sheets,
            clock,
            pacing,
        }
    }

    /// Wire the real TGStat and Sheety clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let tgstat = TgStatClient::new(config.tgstat_token.clone())
            .with_base_url(config.tgstat_base_url.clone());
        let sheety = SheetyClient::new(
            config.sheety_username.clone(),
            config.sheety_project.clone(),
            config.sheety_token.clone(),
        )
        .with_base_url(config.sheety_base_url.clone());

        Self::new(
            Arc::new(TgStatAdapter::new(tgstat, config.channel_id.clone())),
            Arc::new(SheetyAdapter(sheety)),
            Arc::new(SystemClock),
            config.pacing,
        )
    }
}

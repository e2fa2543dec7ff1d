// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no reconciliation logic.
// Collection and sheet diffing live in domains/ and take these as trait objects.
//
// Naming convention: Base* for service traits (e.g., BaseAnalyticsService)

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::common::{PostCounters, RawPost, Sheet, TimeWindow};

// Sheet row types are the Sheety wire types; any tabular backend maps onto them.
pub use sheety_client::{Cell, Row as SheetRow, RowFields};

// =============================================================================
// Analytics Service Trait (Infrastructure - post listing and counters)
// =============================================================================

#[async_trait]
pub trait BaseAnalyticsService: Send + Sync {
    /// Fetch one page of the configured channel's posts published inside `window`.
    async fn channel_posts(
        &self,
        window: &TimeWindow,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<RawPost>>;

    /// Fetch view/share/reaction counters for a post link.
    async fn post_counters(&self, link: &str) -> Result<PostCounters>;
}

// =============================================================================
// Sheet Store Trait (Infrastructure - spreadsheet rows)
// =============================================================================

#[async_trait]
pub trait BaseSheetStore: Send + Sync {
    /// List rows in sheet order.
    async fn list_rows(&self, sheet: Sheet) -> Result<Vec<SheetRow>>;

    /// Append a row.
    async fn insert_row(&self, sheet: Sheet, fields: &RowFields) -> Result<()>;

    /// Overwrite the fields set in `fields`; unset fields keep their value.
    async fn update_row(&self, sheet: Sheet, id: u64, fields: &RowFields) -> Result<()>;

    /// Remove a row. Ids of the rows below it may change.
    async fn delete_row(&self, sheet: Sheet, id: u64) -> Result<()>;
}

// =============================================================================
// Clock Trait
// =============================================================================

/// Source of the local wall-clock time, read once per run.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

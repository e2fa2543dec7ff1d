//! Reconciler domain - brings the spreadsheet in line with a post snapshot.
//!
//! Rows are matched to posts by link only. Row ids are positional on the
//! remote side and shift after each deletion, so deletions always re-read the
//! sheet before picking the next id.

pub mod daily;
pub mod results;
pub mod rows;

use anyhow::Result;
use chrono::NaiveDateTime;
use std::time::Duration;

use crate::common::Sheet;
use crate::domains::collector::PostSnapshot;
use crate::kernel::{pause, BaseSheetStore, RowFields, SheetRow, SyncDeps};

pub use rows::{full_row, is_placeholder, metrics_row, placeholder_row, row_link};

/// Counts of remote mutations performed by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub deleted: usize,
    pub updated: usize,
    pub inserted: usize,
}

pub struct Reconciler<'a> {
    sheets: &'a dyn BaseSheetStore,
    now: NaiveDateTime,
    mutation_delay: Duration,
}

impl<'a> Reconciler<'a> {
    pub fn new(sheets: &'a dyn BaseSheetStore, now: NaiveDateTime, mutation_delay: Duration) -> Self {
        Self {
            sheets,
            now,
            mutation_delay,
        }
    }

    /// Reconciler evaluating date rules against `now`, the run's single clock reading.
    pub fn from_deps(deps: &'a SyncDeps, now: NaiveDateTime) -> Self {
        Self::new(deps.sheets.as_ref(), now, deps.pacing.mutation_delay)
    }

    async fn list(&self, sheet: Sheet) -> Result<Vec<SheetRow>> {
        self.sheets.list_rows(sheet).await
    }

    async fn insert(&self, sheet: Sheet, fields: &RowFields) -> Result<()> {
        self.sheets.insert_row(sheet, fields).await?;
        pause(self.mutation_delay).await;
        Ok(())
    }

    async fn update(&self, sheet: Sheet, id: u64, fields: &RowFields) -> Result<()> {
        self.sheets.update_row(sheet, id, fields).await?;
        pause(self.mutation_delay).await;
        Ok(())
    }

    async fn delete(&self, sheet: Sheet, id: u64) -> Result<()> {
        self.sheets.delete_row(sheet, id).await?;
        pause(self.mutation_delay).await;
        Ok(())
    }

    /// Insert one full row per snapshot post, in snapshot order.
    async fn insert_all(&self, sheet: Sheet, snapshot: &PostSnapshot) -> Result<usize> {
        for post in snapshot.iter() {
            self.insert(sheet, &full_row(post)).await?;
        }
        Ok(snapshot.len())
    }
}

use anyhow::Result;
use std::collections::HashSet;

use super::{full_row, row_link, ReconcileReport, Reconciler};
use crate::common::Sheet;
use crate::domains::collector::PostSnapshot;
use crate::kernel::SheetRow;

impl Reconciler<'_> {
    /// Make the daily sheet hold exactly one row per snapshot post.
    ///
    /// An empty sheet is filled directly. Otherwise rows are pruned, then
    /// surviving rows are rewritten, then missing posts are appended.
    pub async fn sync_daily(&self, snapshot: &PostSnapshot) -> Result<ReconcileReport> {
        let sheet = Sheet::Daily;
        let rows = self.list(sheet).await?;

        if rows.is_empty() {
            let inserted = self.insert_all(sheet, snapshot).await?;
            tracing::info!(sheet = %sheet, inserted, "Filled empty sheet");
            return Ok(ReconcileReport {
                inserted,
                ..Default::default()
            });
        }

        let deleted = self.delete_stale_rows(sheet, snapshot, rows).await?;

        let rows = self.list(sheet).await?;
        let present: HashSet<String> = rows.iter().filter_map(row_link).collect();

        let mut updated = 0;
        for row in &rows {
            let Some(post) = row_link(row).and_then(|link| snapshot.get(&link)) else {
                continue;
            };
            self.update(sheet, row.id, &full_row(post)).await?;
            updated += 1;
        }

        let mut inserted = 0;
        for post in snapshot.iter() {
            if !present.contains(post.link.as_str()) {
                self.insert(sheet, &full_row(post)).await?;
                inserted += 1;
            }
        }

        let report = ReconcileReport {
            deleted,
            updated,
            inserted,
        };
        tracing::info!(
            sheet = %sheet,
            deleted,
            updated,
            inserted,
            "Daily sheet reconciled"
        );
        Ok(report)
    }

    /// Delete stale rows one at a time, re-reading the sheet after each delete
    /// because the remaining rows' ids shift. Deletes at most as many rows as
    /// were stale in `rows`.
    async fn delete_stale_rows(
        &self,
        sheet: Sheet,
        snapshot: &PostSnapshot,
        rows: Vec<SheetRow>,
    ) -> Result<usize> {
        let budget = stale_row_ids(&rows, snapshot).len();
        let mut rows = rows;
        let mut deleted = 0;

        while deleted < budget {
            let Some(id) = stale_row_ids(&rows, snapshot).first().copied() else {
                break;
            };
            tracing::debug!(sheet = %sheet, row_id = id, "Deleting stale row");
            self.delete(sheet, id).await?;
            deleted += 1;
            rows = self.list(sheet).await?;
        }

        let remaining = stale_row_ids(&rows, snapshot).len();
        if remaining > 0 {
            tracing::warn!(sheet = %sheet, remaining, "Stale rows appeared during deletion");
        }

        Ok(deleted)
    }
}

/// Ids of rows to remove: blank links, links not in the snapshot, and every
/// repeat of a link already seen higher up the sheet.
pub fn stale_row_ids(rows: &[SheetRow], snapshot: &PostSnapshot) -> Vec<u64> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| match row_link(row) {
            Some(link) => !snapshot.contains(&link) || !seen.insert(link),
            None => true,
        })
        .map(|row| row.id)
        .collect()
}

use anyhow::Result;

use super::{is_placeholder, metrics_row, placeholder_row, row_link, ReconcileReport, Reconciler};
use crate::common::{in_reporting_window, Sheet};
use crate::domains::collector::PostSnapshot;
use crate::kernel::SheetRow;

impl Reconciler<'_> {
    /// Apply the reporting-window policy to the results sheet.
    ///
    /// Inside the window the sheet carries last month's posts, published once
    /// and then only refreshed in their ratio columns. Outside the window it
    /// carries a single placeholder row.
    pub async fn sync_results(&self, snapshot: &PostSnapshot) -> Result<ReconcileReport> {
        let sheet = Sheet::Results;
        let rows = self.list(sheet).await?;
        let reporting = in_reporting_window(self.now);
        let mut report = ReconcileReport::default();

        let Some(first) = rows.first() else {
            if reporting {
                report.inserted = self.insert_all(sheet, snapshot).await?;
            } else {
                self.insert(sheet, &placeholder_row()).await?;
                report.inserted = 1;
            }
            tracing::info!(sheet = %sheet, reporting, inserted = report.inserted, "Filled empty sheet");
            return Ok(report);
        };

        let first_id = first.id;
        match (reporting, is_placeholder(first)) {
            (true, true) => {
                self.delete(sheet, first_id).await?;
                report.deleted = 1;
                report.inserted = self.insert_all(sheet, snapshot).await?;
                tracing::info!(sheet = %sheet, inserted = report.inserted, "Published monthly report");
            }
            (true, false) => {
                report.updated = self.refresh_metrics(sheet, &rows, snapshot).await?;
                tracing::info!(sheet = %sheet, updated = report.updated, "Refreshed monthly report");
            }
            (false, false) => {
                report.deleted = self.clear(sheet, rows).await?;
                self.insert(sheet, &placeholder_row()).await?;
                report.inserted = 1;
                tracing::info!(sheet = %sheet, deleted = report.deleted, "Replaced report with placeholder");
            }
            (false, true) => {
                tracing::debug!(sheet = %sheet, "Placeholder already in place");
            }
        }

        Ok(report)
    }

    /// Overwrite the ratio columns of every row whose link is in the snapshot.
    async fn refresh_metrics(
        &self,
        sheet: Sheet,
        rows: &[SheetRow],
        snapshot: &PostSnapshot,
    ) -> Result<usize> {
        let mut updated = 0;

        for row in rows {
            let link = row_link(row);
            match link.as_deref().and_then(|link| snapshot.get(link)) {
                Some(post) => {
                    self.update(sheet, row.id, &metrics_row(post)).await?;
                    updated += 1;
                }
                None => {
                    tracing::warn!(
                        sheet = %sheet,
                        row_id = row.id,
                        link = link.as_deref().unwrap_or_default(),
                        "Row not in monthly snapshot, left untouched"
                    );
                }
            }
        }

        Ok(updated)
    }

    /// Delete every row, always taking the current first row.
    async fn clear(&self, sheet: Sheet, rows: Vec<SheetRow>) -> Result<usize> {
        let budget = rows.len();
        let mut rows = rows;
        let mut deleted = 0;

        while deleted < budget {
            let Some(id) = rows.first().map(|row| row.id) else {
                break;
            };
            self.delete(sheet, id).await?;
            deleted += 1;
            rows = self.list(sheet).await?;
        }

        Ok(deleted)
    }
}

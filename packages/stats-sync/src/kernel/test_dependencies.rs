// Test doubles for the kernel traits
//
// In-memory analytics service and sheet store that can be injected into
// SyncDeps for tests, plus a fixed clock.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    BaseAnalyticsService, BaseSheetStore, Clock, Pacing, RowFields, SheetRow, SyncDeps,
};
use crate::common::{PostCounters, RawPost, Sheet, TimeWindow};

// =============================================================================
// Fixed Clock
// =============================================================================

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

// =============================================================================
// Mock Analytics Service
// =============================================================================

/// Arguments captured from a channel_posts call
#[derive(Debug, Clone, PartialEq)]
pub struct PageCall {
    pub window: TimeWindow,
    pub limit: u32,
    pub offset: u32,
}

/// Serves a fixed channel history, filtered by window and sliced into pages.
#[derive(Default)]
pub struct MockAnalyticsService {
    posts: Vec<RawPost>,
    counters: HashMap<String, PostCounters>,
    failing_offsets: Vec<u32>,
    page_calls: Arc<Mutex<Vec<PageCall>>>,
    stat_calls: Arc<Mutex<Vec<String>>>,
}

impl MockAnalyticsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post with its counters.
    pub fn with_post(mut self, post: RawPost, counters: PostCounters) -> Self {
        self.counters.insert(post.link.clone(), counters);
        self.posts.push(post);
        self
    }

    /// Add a post whose counters are unknown (stat requests for it fail).
    pub fn with_uncounted_post(mut self, post: RawPost) -> Self {
        self.posts.push(post);
        self
    }

    /// Make the page request at `offset` fail like a non-2xx response.
    pub fn failing_at_offset(mut self, offset: u32) -> Self {
        self.failing_offsets.push(offset);
        self
    }

    pub fn page_calls(&self) -> Vec<PageCall> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn stat_calls(&self) -> Vec<String> {
        self.stat_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseAnalyticsService for MockAnalyticsService {
    async fn channel_posts(
        &self,
        window: &TimeWindow,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<RawPost>> {
        self.page_calls.lock().unwrap().push(PageCall {
            window: *window,
            limit,
            offset,
        });

        if self.failing_offsets.contains(&offset) {
            bail!("API error (500): mock failure at offset {}", offset);
        }

        Ok(self
            .posts
            .iter()
            .filter(|post| window.contains(post.date))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn post_counters(&self, link: &str) -> Result<PostCounters> {
        self.stat_calls.lock().unwrap().push(link.to_string());

        match self.counters.get(link) {
            Some(counters) => Ok(*counters),
            None => bail!("missing field `viewsCount` for {}", link),
        }
    }
}

// =============================================================================
// In-Memory Sheet Store
// =============================================================================

/// Record of a call made to the sheet store.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCall {
    List(Sheet),
    Insert(Sheet),
    Update { sheet: Sheet, id: u64 },
    Delete { sheet: Sheet, id: u64 },
}

/// Sheet store with spreadsheet row numbering: the first data row has id 2
/// and deleting a row shifts the ids of every row below it.
#[derive(Default)]
pub struct InMemorySheetStore {
    sheets: Arc<Mutex<HashMap<Sheet, Vec<RowFields>>>>,
    calls: Arc<Mutex<Vec<SheetCall>>>,
}

/// Id of the first data row; row 1 holds the headers.
pub const FIRST_ROW_ID: u64 = 2;

impl InMemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, sheet: Sheet, rows: Vec<RowFields>) -> Self {
        self.sheets.lock().unwrap().insert(sheet, rows);
        self
    }

    pub fn rows(&self, sheet: Sheet) -> Vec<SheetRow> {
        let sheets = self.sheets.lock().unwrap();
        sheets
            .get(&sheet)
            .map(|rows| numbered(rows))
            .unwrap_or_default()
    }

    /// `postUrl` of every row, in sheet order.
    pub fn links(&self, sheet: Sheet) -> Vec<String> {
        self.rows(sheet)
            .into_iter()
            .filter_map(|row| row.fields.post_url.map(|cell| cell.to_string()))
            .collect()
    }

    pub fn calls(&self) -> Vec<SheetCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: SheetCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn numbered(rows: &[RowFields]) -> Vec<SheetRow> {
    rows.iter()
        .enumerate()
        .map(|(index, fields)| SheetRow {
            id: FIRST_ROW_ID + index as u64,
            fields: fields.clone(),
        })
        .collect()
}

fn row_index(rows: &[RowFields], id: u64) -> Option<usize> {
    let index = id.checked_sub(FIRST_ROW_ID)? as usize;
    (index < rows.len()).then_some(index)
}

#[async_trait]
impl BaseSheetStore for InMemorySheetStore {
    async fn list_rows(&self, sheet: Sheet) -> Result<Vec<SheetRow>> {
        self.record(SheetCall::List(sheet));
        Ok(self.rows(sheet))
    }

    async fn insert_row(&self, sheet: Sheet, fields: &RowFields) -> Result<()> {
        self.record(SheetCall::Insert(sheet));
        self.sheets
            .lock()
            .unwrap()
            .entry(sheet)
            .or_default()
            .push(fields.clone());
        Ok(())
    }

    async fn update_row(&self, sheet: Sheet, id: u64, fields: &RowFields) -> Result<()> {
        self.record(SheetCall::Update { sheet, id });
        let mut sheets = self.sheets.lock().unwrap();
        let rows = sheets.entry(sheet).or_default();
        let Some(index) = row_index(rows, id) else {
            bail!("API error (404): row {} not found in {}", id, sheet);
        };

        let row = &mut rows[index];
        if let Some(value) = &fields.post_preview {
            row.post_preview = Some(value.clone());
        }
        if let Some(value) = &fields.post_url {
            row.post_url = Some(value.clone());
        }
        if let Some(value) = &fields.post_date {
            row.post_date = Some(value.clone());
        }
        if let Some(value) = &fields.shares_per_view {
            row.shares_per_view = Some(value.clone());
        }
        if let Some(value) = &fields.reactions_per_view {
            row.reactions_per_view = Some(value.clone());
        }
        Ok(())
    }

    async fn delete_row(&self, sheet: Sheet, id: u64) -> Result<()> {
        self.record(SheetCall::Delete { sheet, id });
        let mut sheets = self.sheets.lock().unwrap();
        let rows = sheets.entry(sheet).or_default();
        let Some(index) = row_index(rows, id) else {
            bail!("API error (404): row {} not found in {}", id, sheet);
        };
        rows.remove(index);
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks plus a SyncDeps wired to them, with pacing disabled.
pub struct TestDependencies {
    pub analytics: Arc<MockAnalyticsService>,
    pub sheets: Arc<InMemorySheetStore>,
    pub deps: SyncDeps,
}

impl TestDependencies {
    pub fn new(
        analytics: MockAnalyticsService,
        sheets: InMemorySheetStore,
        now: NaiveDateTime,
    ) -> Self {
        let analytics = Arc::new(analytics);
        let sheets = Arc::new(sheets);
        let deps = SyncDeps::new(
            analytics.clone(),
            sheets.clone(),
            Arc::new(FixedClock(now)),
            Pacing::none(),
        );

        Self {
            analytics,
            sheets,
            deps,
        }
    }
}

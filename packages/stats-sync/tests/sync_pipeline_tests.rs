//! End-to-end sync runs against the in-memory analytics service and sheet store.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::*;
use stats_sync_core::common::Sheet;
use stats_sync_core::domains::reconciler::{is_placeholder, placeholder_row};
use stats_sync_core::kernel::test_dependencies::{
    FixedClock, InMemorySheetStore, MockAnalyticsService,
};
use stats_sync_core::kernel::{Cell, Pacing, SyncDeps, TestDependencies};
use stats_sync_core::pipeline::run_full_sync;

fn rerun_at(test: &TestDependencies, now: chrono::NaiveDateTime) -> SyncDeps {
    SyncDeps::new(
        test.analytics.clone(),
        test.sheets.clone(),
        Arc::new(FixedClock(now)),
        Pacing::none(),
    )
}

#[tokio::test]
async fn test_first_run_in_reporting_window_fills_both_sheets() {
    let test = TestDependencies::new(channel_history(), InMemorySheetStore::new(), at(10, 15, 10));

    let summary = run_full_sync(&test.deps).await.unwrap();

    assert_eq!(summary.daily_posts, 3);
    assert_eq!(summary.monthly_posts, 2);
    assert_eq!(
        test.sheets.links(Sheet::Daily),
        vec!["t.me/kleymedia/20", "t.me/kleymedia/30", "t.me/kleymedia/31"]
    );
    assert_eq!(
        test.sheets.links(Sheet::Results),
        vec!["t.me/kleymedia/10", "t.me/kleymedia/20"]
    );

    let daily = test.sheets.rows(Sheet::Daily);
    assert_eq!(daily[0].fields.post_preview, Some(Cell::from("Album caption...")));
    assert_eq!(daily[0].fields.post_date, Some(Cell::from("20.09.24")));
    assert_eq!(daily[0].fields.shares_per_view, Some(Cell::Number(0.5)));
    assert_eq!(daily[0].fields.reactions_per_view, Some(Cell::Number(2.5)));
    assert_eq!(
        daily[1].fields.post_preview,
        Some(Cell::from("one two three four five six seven eight nine ten..."))
    );
    assert_eq!(daily[2].fields.post_preview, Some(Cell::from("*пост без текста*")));
}

#[tokio::test]
async fn test_album_counters_fetched_for_canonical_link_only() {
    let test = TestDependencies::new(channel_history(), InMemorySheetStore::new(), at(10, 20, 10));

    run_full_sync(&test.deps).await.unwrap();

    let stat_calls = test.analytics.stat_calls();
    assert!(stat_calls.contains(&"t.me/kleymedia/20".to_string()));
    assert!(!stat_calls.contains(&"t.me/kleymedia/21".to_string()));
    assert!(!stat_calls.contains(&"t.me/kleymedia/22".to_string()));
}

#[tokio::test]
async fn test_first_run_outside_reporting_window_writes_placeholder() {
    let test = TestDependencies::new(channel_history(), InMemorySheetStore::new(), at(10, 20, 10));

    let summary = run_full_sync(&test.deps).await.unwrap();

    assert_eq!(summary.monthly_posts, 0);
    let results = test.sheets.rows(Sheet::Results);
    assert_eq!(results.len(), 1);
    assert!(is_placeholder(&results[0]));
}

#[tokio::test]
async fn test_report_cycle_across_the_month() {
    let sheets = InMemorySheetStore::new().with_rows(Sheet::Results, vec![placeholder_row()]);
    let test = TestDependencies::new(channel_history(), sheets, at(10, 14, 8));

    // Day 14: placeholder replaced by September's posts
    run_full_sync(&test.deps).await.unwrap();
    assert_eq!(
        test.sheets.links(Sheet::Results),
        vec!["t.me/kleymedia/10", "t.me/kleymedia/20"]
    );

    // Day 16: same report, ratios refreshed in place
    test.sheets.clear_calls();
    let summary = run_full_sync(&rerun_at(&test, at(10, 16, 8))).await.unwrap();
    assert_eq!(summary.results.updated, 2);
    assert_eq!(summary.results.inserted, 0);
    assert_eq!(test.sheets.rows(Sheet::Results).len(), 2);

    // Day 20: report withdrawn, placeholder back
    let summary = run_full_sync(&rerun_at(&test, at(10, 20, 8))).await.unwrap();
    assert_eq!(summary.results.deleted, 2);
    let results = test.sheets.rows(Sheet::Results);
    assert_eq!(results.len(), 1);
    assert!(is_placeholder(&results[0]));
}

#[tokio::test]
async fn test_daily_sheet_tracks_rolling_window() {
    let test = TestDependencies::new(channel_history(), InMemorySheetStore::new(), at(10, 15, 10));
    run_full_sync(&test.deps).await.unwrap();

    // By Oct 25 the Sep 20 album has left the 31-day window
    let summary = run_full_sync(&rerun_at(&test, at(10, 25, 10))).await.unwrap();

    assert_eq!(summary.daily.deleted, 1);
    assert_eq!(summary.daily.updated, 2);
    assert_eq!(summary.daily.inserted, 0);

    let links: HashSet<String> = test.sheets.links(Sheet::Daily).into_iter().collect();
    let expected: HashSet<String> = ["t.me/kleymedia/30", "t.me/kleymedia/31"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(links, expected);
}

#[tokio::test]
async fn test_failed_collection_leaves_sheets_untouched() {
    let analytics = channel_history().failing_at_offset(0);
    let test = TestDependencies::new(analytics, InMemorySheetStore::new(), at(10, 15, 10));

    let result = run_full_sync(&test.deps).await;

    assert!(result.is_err());
    assert!(test.sheets.calls().is_empty());
}

#[tokio::test]
async fn test_zero_views_aborts_run() {
    let analytics = MockAnalyticsService::new().with_post(
        post(40, None, at(10, 12, 12), "fresh post"),
        counters(0, 0, 0),
    );
    let test = TestDependencies::new(analytics, InMemorySheetStore::new(), at(10, 15, 10));

    let err = run_full_sync(&test.deps).await.unwrap_err();

    assert!(format!("{:#}", err).contains("t.me/kleymedia/40"));
    assert!(test.sheets.calls().is_empty());
}

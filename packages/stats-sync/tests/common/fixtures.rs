// Channel history fixtures for sync tests

use chrono::{NaiveDate, NaiveDateTime};
use stats_sync_core::common::{PostCounters, RawPost};
use stats_sync_core::kernel::test_dependencies::MockAnalyticsService;

pub fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn post(number: u32, group: Option<&str>, date: NaiveDateTime, text: &str) -> RawPost {
    RawPost {
        link: format!("t.me/kleymedia/{}", number),
        group_id: group.map(str::to_string),
        date,
        text: text.to_string(),
    }
}

pub fn counters(views: i64, shares: i64, reactions: i64) -> PostCounters {
    PostCounters {
        views,
        shares,
        reactions,
    }
}

/// September and October 2024 history of a channel:
///
/// - #10, single post on Sep 3 (previous month only when run mid-October)
/// - #20..#22, album on Sep 20, caption on #20 (in both windows)
/// - #30, single post on Oct 2
/// - #31, media-only post on Oct 10
pub fn channel_history() -> MockAnalyticsService {
    MockAnalyticsService::new()
        .with_post(
            post(10, None, at(9, 3, 9), "Итоги августа: что читали больше всего и почему"),
            counters(2000, 10, 50),
        )
        .with_post(post(21, Some("g20"), at(9, 20, 12), ""), counters(1500, 0, 0))
        .with_post(
            post(20, Some("g20"), at(9, 20, 12), "<b>Album</b> caption"),
            counters(1000, 5, 25),
        )
        .with_post(post(22, Some("g20"), at(9, 20, 12), ""), counters(1500, 0, 0))
        .with_post(
            post(30, None, at(10, 2, 18), "one two three four five six seven eight nine ten eleven"),
            counters(800, 8, 16),
        )
        .with_post(post(31, None, at(10, 10, 7), ""), counters(400, 1, 3))
}

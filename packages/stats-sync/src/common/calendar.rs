//! Date windows driving collection and the results sheet policy.
//!
//! All values are naive wall-clock times in the host's local zone; they are
//! converted to unix timestamps only at the analytics API boundary.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Length of the rolling daily window.
pub const DAILY_WINDOW_DAYS: i64 = 31;

/// Days of the month (inclusive) during which the monthly report is published.
pub const REPORTING_DAYS: std::ops::RangeInclusive<u32> = 14..=16;

/// Closed interval of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn start_unix(&self) -> i64 {
        to_unix(self.start)
    }

    pub fn end_unix(&self) -> i64 {
        to_unix(self.end)
    }
}

/// `[now - 31 days, now]`.
pub fn daily_window(now: NaiveDateTime) -> TimeWindow {
    TimeWindow {
        start: now - Duration::days(DAILY_WINDOW_DAYS),
        end: now,
    }
}

/// First second to last second of the calendar month before `now`.
pub fn previous_month_window(now: NaiveDateTime) -> TimeWindow {
    let (year, month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    let last_day = days_in_month(year, month);

    TimeWindow {
        start: date(year, month, 1).and_time(NaiveTime::MIN),
        end: date(year, month, last_day).and_hms_opt(23, 59, 59).unwrap_or_default(),
    }
}

/// True on days 14 to 16 of the month, at any time of day.
pub fn in_reporting_window(now: NaiveDateTime) -> bool {
    REPORTING_DAYS.contains(&now.day())
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    date(next_year, next_month, 1)
        .pred_opt()
        .map(|last| last.day())
        .unwrap_or(28)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Interpret a local wall-clock time as a unix timestamp.
pub fn to_unix(at: NaiveDateTime) -> i64 {
    Local
        .from_local_datetime(&at)
        .earliest()
        .map(|local| local.timestamp())
        .unwrap_or_else(|| at.and_utc().timestamp())
}

/// Local wall-clock time of a unix timestamp.
pub fn from_unix(secs: i64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0)
        .map(|utc| utc.with_timezone(&Local).naive_local())
        .ok_or_else(|| anyhow!("timestamp {} is out of range", secs))
}

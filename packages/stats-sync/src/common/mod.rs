pub mod calendar;
pub mod types;

pub use calendar::{
    daily_window, in_reporting_window, previous_month_window, TimeWindow,
};
pub use types::{PostCounters, RawPost, Sheet};

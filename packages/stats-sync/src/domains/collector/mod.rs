//! Collector domain - builds the post snapshot from the analytics API.

pub mod actions;
pub mod grouping;
pub mod models;
pub mod ordering;
pub mod text;

pub use actions::{fetch_stats, fetch_window, Collector, PAGE_SIZE};
pub use grouping::resolve_groups;
pub use models::{PostEntry, PostMap, PostSnapshot, PostStats};
pub use ordering::order_chronologically;
pub use text::{trim_text, NO_TEXT_SENTINEL};

// Post Stats Sync - Core
//
// Collects per-view engagement of a Telegram channel's posts from TGStat and
// mirrors it into the `daily` and `results` tabs of a Sheety-backed sheet.
//
// One run is strictly sequential: collect daily, collect monthly, reconcile
// daily, reconcile results.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod pipeline;

pub use config::*;

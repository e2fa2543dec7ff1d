//! Kernel module - external service seams and run dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{pause, Pacing, SheetyAdapter, SyncDeps, SystemClock, TgStatAdapter};
pub use test_dependencies::TestDependencies;
pub use traits::*;

// Shared test infrastructure
pub mod fixtures;

pub use fixtures::*;

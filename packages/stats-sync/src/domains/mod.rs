// Business domains
pub mod collector;
pub mod reconciler;

//! Metrics module for the derived-view cache.

pub mod cache;

pub use cache::{CacheMetrics, register_cache_metrics};

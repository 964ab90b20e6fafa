//! Key-value stores backing the derived-view cache.
//!
//! A store only needs keyed `get` and `set` with a per-entry TTL. No
//! iteration, ordering or multi-key operation is ever requested of it.

pub mod clock;
pub mod memory;
pub mod moka_store;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::cache::CachedValue;
use crate::config::ViewCacheConfig;
use crate::metrics::CacheMetrics;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::MemoryStore;
pub use moka_store::MokaStore;

/// Failure of a cache store.
///
/// These never reach callers of the derived-view cache: a failing store is
/// treated as an empty one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("corrupt cache entry '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// A key-value store with per-entry time-to-live.
pub trait ViewStore: Send + Sync {
    /// Returns the live value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<CachedValue>, StoreError>;

    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    fn set(&self, key: &str, value: CachedValue, ttl: Duration) -> Result<(), StoreError>;

    /// Returns the name of this store, used in logs.
    fn name(&self) -> &str;
}

/// Store that retains nothing. Used when caching is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl ViewStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<CachedValue>, StoreError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: CachedValue, _ttl: Duration) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Builds the store selected by `config`, reporting evictions to `metrics`.
pub fn build_store(config: &ViewCacheConfig, metrics: &CacheMetrics) -> Arc<dyn ViewStore> {
    if config.enabled {
        Arc::new(MokaStore::with_metrics(config.max_capacity, metrics.clone()))
    } else {
        Arc::new(NullStore)
    }
}

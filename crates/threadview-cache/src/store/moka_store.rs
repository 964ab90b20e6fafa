//! In-process store using Moka.

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::notification::RemovalCause;
use moka::sync::Cache;

use super::{StoreError, ViewStore};
use crate::cache::CachedValue;
use crate::metrics::CacheMetrics;

#[derive(Debug, Clone)]
struct StoredEntry {
    value: CachedValue,
    ttl: Duration,
}

/// Expira cada entry segun el TTL con el que fue escrita.
struct PerEntryTtl;

impl Expiry<String, StoredEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Bounded, thread-safe store keeping [`CachedValue`]s natively.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use threadview_cache::cache::CachedValue;
/// use threadview_cache::store::{MokaStore, ViewStore};
///
/// let store = MokaStore::new(1_000);
/// store.set("next-link:1:3", CachedValue::Absent, Duration::from_secs(300)).unwrap();
/// assert_eq!(store.get("next-link:1:3").unwrap(), Some(CachedValue::Absent));
/// ```
#[derive(Clone)]
pub struct MokaStore {
    inner: Cache<String, StoredEntry>,
}

impl MokaStore {
    /// Crea un store con la capacidad maxima dada.
    pub fn new(max_capacity: u64) -> Self {
        Self::with_metrics(max_capacity, CacheMetrics::new())
    }

    /// Crea un store que reporta evictions en `metrics`.
    pub fn with_metrics(max_capacity: u64, metrics: CacheMetrics) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .eviction_listener(move |_key, _value, cause| {
                let reason = match cause {
                    RemovalCause::Expired => "ttl",
                    RemovalCause::Size => "capacity",
                    RemovalCause::Explicit => "manual",
                    RemovalCause::Replaced => "replaced",
                };
                metrics.record_eviction(reason);
            })
            .build();

        Self { inner }
    }

    /// Retorna el numero aproximado de entries.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Fuerza la limpieza de entries expiradas.
    pub fn sync(&self) {
        self.inner.run_pending_tasks();
    }
}

impl ViewStore for MokaStore {
    fn get(&self, key: &str) -> Result<Option<CachedValue>, StoreError> {
        Ok(self.inner.get(key).map(|entry| entry.value))
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) -> Result<(), StoreError> {
        self.inner.insert(key.to_string(), StoredEntry { value, ttl });
        Ok(())
    }

    fn name(&self) -> &str {
        "moka"
    }
}

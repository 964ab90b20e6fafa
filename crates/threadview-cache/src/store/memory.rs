//! Scalar-string store with an injectable clock.
//!
//! Values are kept in their string encoding, the way an external object
//! cache holding opaque scalars would keep them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use super::clock::{Clock, SystemClock};
use super::{StoreError, ViewStore};
use crate::cache::CachedValue;

#[derive(Debug)]
struct Entry {
    raw: String,
    /// `None` when `written_at + ttl` is past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| now < expires_at)
    }
}

/// In-memory store holding tag-encoded values.
///
/// An entry written with TTL `t` at time `w` is live while `now < w + t`.
/// Expired entries are dropped on read. A TTL too large to add to the
/// current instant never expires.
pub struct MemoryStore<C = SystemClock> {
    entries: RwLock<HashMap<String, Entry>>,
    clock: C,
}

impl MemoryStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of entries held, expired ones included until next read.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Writes a raw string under `key`, bypassing encoding.
    pub fn set_raw(&self, key: &str, raw: impl Into<String>, ttl: Duration) {
        let expires_at = self.clock.now().checked_add(ttl);
        self.entries.write().insert(
            key.to_string(),
            Entry {
                raw: raw.into(),
                expires_at,
            },
        );
    }

    /// Returns the raw string under `key` if live.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        let now = self.clock.now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Some(entry.raw.clone()),
                Some(_) => {},
                None => return None,
            }
        }

        let mut entries = self.entries.write();
        // Re-check under the write lock: a concurrent set may have refreshed it.
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        None
    }
}

impl<C: Clock> ViewStore for MemoryStore<C> {
    fn get(&self, key: &str) -> Result<Option<CachedValue>, StoreError> {
        self.get_raw(key)
            .map(|raw| CachedValue::decode(key, &raw))
            .transpose()
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) -> Result<(), StoreError> {
        self.set_raw(key, value.encode(), ttl);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

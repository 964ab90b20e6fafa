use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use threadview_cache::{CachedValue, MemoryStore, StoreError, ViewStore};

/// Memory store whose reads and writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    sets: AtomicU32,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down() -> Self {
        let store = Self::default();
        store.fail_reads(true);
        store.fail_writes(true);
        store
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    /// Successful writes so far.
    pub fn sets(&self) -> u32 {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl ViewStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<CachedValue>, StoreError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("connection refused"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) -> Result<(), StoreError> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("connection refused"));
        }
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl)
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

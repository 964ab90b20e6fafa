//! Cache metrics recording.

use metrics::{counter, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::cache::ViewKind;

/// Registra las metricas de cache.
/// Llamar una vez al inicio, despues de instalar el recorder.
pub fn register_cache_metrics() {
    metrics::describe_counter!(
        "threadview_cache_hits_total",
        "Total number of derived-view cache hits"
    );
    metrics::describe_counter!(
        "threadview_cache_misses_total",
        "Total number of derived-view cache misses"
    );
    metrics::describe_counter!(
        "threadview_cache_store_errors_total",
        "Store failures degraded to cache misses or dropped writes"
    );
    metrics::describe_counter!(
        "threadview_cache_evictions_total",
        "Total number of cache evictions"
    );
    metrics::describe_histogram!(
        "threadview_cache_compute_seconds",
        "Time spent computing derived views on a miss"
    );
}

/// Recorder de metricas de cache.
/// Usa atomic counters internos para maximo rendimiento.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    store_errors: Arc<AtomicU64>,
    evictions: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            store_errors: Arc::new(AtomicU64::new(0)),
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registra un cache hit
    pub fn record_hit(&self, view: ViewKind) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("threadview_cache_hits_total", "view" => view.as_str()).increment(1);
    }

    /// Registra un cache miss
    pub fn record_miss(&self, view: ViewKind) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("threadview_cache_misses_total", "view" => view.as_str()).increment(1);
    }

    /// Registra un fallo del store ("get" o "set")
    pub fn record_store_error(&self, operation: &'static str) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
        counter!("threadview_cache_store_errors_total", "operation" => operation).increment(1);
    }

    /// Registra una eviction
    pub fn record_eviction(&self, reason: &'static str) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
        counter!("threadview_cache_evictions_total", "reason" => reason).increment(1);
    }

    /// Registra la duracion del calculo de una vista
    pub fn record_compute_duration(&self, view: ViewKind, duration: Duration) {
        histogram!("threadview_cache_compute_seconds", "view" => view.as_str())
            .record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let misses = self.misses.load(Ordering::Relaxed) as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    /// Retorna el numero de hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Retorna el numero de misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Retorna el numero de fallos del store
    pub fn store_errors(&self) -> u64 {
        self.store_errors.load(Ordering::Relaxed)
    }

    /// Retorna el numero de evictions del store
    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}

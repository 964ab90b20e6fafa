//! Memoized derived views of a thread.

use std::sync::Arc;
use std::time::{Duration, Instant};

use threadview_core::{ResponseCount, Result, ThreadContext, ThreadRenderer, ThreadSource};
use tracing::{debug, warn};

use crate::cache::keys::ViewKey;
use crate::cache::value::ViewValue;
use crate::config::ViewCacheConfig;
use crate::metrics::CacheMetrics;
use crate::store::{ViewStore, build_store};

/// Memoizing cache of the derived views of a thread.
///
/// Each accessor builds its [`ViewKey`] from the [`ThreadContext`], serves
/// the stored value when there is one, and otherwise asks the collaborators,
/// stores the result for the configured TTL and returns it.
///
/// Errors from the thread source or the renderer are returned unchanged and
/// nothing is stored for them. Store failures are never returned: a failed
/// read is a miss and a failed write is dropped.
///
/// There is no single-flight guard. Concurrent misses on the same key each
/// compute the view and the last write wins.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use threadview_cache::{DerivedViewCache, ViewCacheConfig};
/// use threadview_core::{
///     PostId, ResponseCount, Result, ThreadContext, ThreadRenderer, ThreadSource, ThreadState,
/// };
///
/// struct Source;
/// impl ThreadSource for Source {
///     fn thread_state(&self, _post: PostId) -> Result<ThreadState> {
///         Ok(ThreadState { response_count: 1, ..Default::default() })
///     }
/// }
///
/// struct Renderer;
/// impl ThreadRenderer for Renderer {
///     fn title(&self, _post: PostId, count: ResponseCount) -> Result<String> {
///         Ok(if count.is_singular() { "One response".into() } else { format!("{} responses", count.count()) })
///     }
///     fn responses(&self, _ctx: &ThreadContext) -> Result<String> { Ok("<ol></ol>".into()) }
///     fn previous_link(&self, _ctx: &ThreadContext) -> Result<Option<String>> { Ok(None) }
///     fn next_link(&self, _ctx: &ThreadContext) -> Result<Option<String>> { Ok(None) }
/// }
///
/// let cache = DerivedViewCache::from_config(
///     &ViewCacheConfig::default(),
///     Arc::new(Source),
///     Arc::new(Renderer),
/// );
/// let ctx = ThreadContext::new(PostId::new(1), 1);
/// assert_eq!(cache.title(&ctx).unwrap(), "One response");
/// assert!(!cache.is_closed(&ctx).unwrap());
/// ```
#[derive(Clone)]
pub struct DerivedViewCache {
    store: Arc<dyn ViewStore>,
    source: Arc<dyn ThreadSource>,
    renderer: Arc<dyn ThreadRenderer>,
    ttl: Duration,
    namespace: String,
    metrics: CacheMetrics,
}

impl DerivedViewCache {
    /// Crea un cache sobre el store dado.
    pub fn new(
        config: &ViewCacheConfig,
        store: Arc<dyn ViewStore>,
        source: Arc<dyn ThreadSource>,
        renderer: Arc<dyn ThreadRenderer>,
    ) -> Self {
        Self::with_metrics(config, store, source, renderer, CacheMetrics::new())
    }

    /// Crea un cache con el store que indica la configuracion.
    ///
    /// El store reporta sus evictions en las mismas metricas que el cache.
    pub fn from_config(
        config: &ViewCacheConfig,
        source: Arc<dyn ThreadSource>,
        renderer: Arc<dyn ThreadRenderer>,
    ) -> Self {
        let metrics = CacheMetrics::new();
        let store = build_store(config, &metrics);
        Self::with_metrics(config, store, source, renderer, metrics)
    }

    fn with_metrics(
        config: &ViewCacheConfig,
        store: Arc<dyn ViewStore>,
        source: Arc<dyn ThreadSource>,
        renderer: Arc<dyn ThreadRenderer>,
        metrics: CacheMetrics,
    ) -> Self {
        Self {
            store,
            source,
            renderer,
            ttl: config.ttl(),
            namespace: config.namespace.clone(),
            metrics,
        }
    }

    /// Summary title, keyed by post and response count.
    pub fn title(&self, ctx: &ThreadContext) -> Result<String> {
        let post = ctx.post_id();
        let count = ResponseCount::from_count(ctx.response_count());
        self.memoize(ViewKey::title(ctx), || self.renderer.title(post, count))
    }

    /// Rendered responses on the current page, or `None` when the thread has
    /// no responses. The empty case never touches the store.
    pub fn responses(&self, ctx: &ThreadContext) -> Result<Option<String>> {
        if !ctx.has_responses() {
            return Ok(None);
        }
        self.memoize(ViewKey::responses(ctx), || self.renderer.responses(ctx))
            .map(Some)
    }

    /// Link to the older page, keyed by post and page. A missing link is
    /// memoized too.
    pub fn previous_link(&self, ctx: &ThreadContext) -> Result<Option<String>> {
        self.memoize(ViewKey::previous_link(ctx), || {
            self.renderer.previous_link(ctx)
        })
    }

    /// Link to the newer page, keyed by post and page.
    pub fn next_link(&self, ctx: &ThreadContext) -> Result<Option<String>> {
        self.memoize(ViewKey::next_link(ctx), || self.renderer.next_link(ctx))
    }

    /// True when the thread spans more than one page and the site paginates
    /// responses. Keyed by post only.
    pub fn is_paginated(&self, ctx: &ThreadContext) -> Result<bool> {
        let post = ctx.post_id();
        self.memoize(ViewKey::paginated(ctx), || {
            let state = self.source.thread_state(post)?;
            Ok(state.total_pages > 1 && state.pagination_enabled)
        })
    }

    /// True when the thread is closed, has responses, and its content type
    /// supports threads. A closed thread without responses reports `false`.
    /// Keyed by post only.
    pub fn is_closed(&self, ctx: &ThreadContext) -> Result<bool> {
        let post = ctx.post_id();
        self.memoize(ViewKey::closed(ctx), || {
            let state = self.source.thread_state(post)?;
            Ok(!state.is_open && state.response_count != 0 && state.supports_threads)
        })
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn memoize<T, F>(&self, key: ViewKey, compute: F) -> Result<T>
    where
        T: ViewValue + Clone,
        F: FnOnce() -> Result<T>,
    {
        let view = key.kind();
        let post = key.post();
        let store_key = key.to_store_key(&self.namespace);

        if let Some(value) = self.lookup::<T>(&store_key) {
            self.metrics.record_hit(view);
            debug!(key = %store_key, post = %post, "Derived view served from cache");
            return Ok(value);
        }

        self.metrics.record_miss(view);
        debug!(key = %store_key, post = %post, "Derived view cache miss");

        let start = Instant::now();
        let value = compute()?;
        self.metrics.record_compute_duration(view, start.elapsed());

        if let Err(e) = self
            .store
            .set(&store_key, value.clone().into_cached(), self.ttl)
        {
            self.metrics.record_store_error("set");
            warn!(
                key = %store_key,
                store = self.store.name(),
                error = %e,
                "Cache store write failed, result not memoized"
            );
        } else {
            debug!(
                key = %store_key,
                post = %post,
                ttl_secs = self.ttl.as_secs(),
                "Derived view cached"
            );
        }

        Ok(value)
    }

    /// Reads and decodes `store_key`. Store failures and values of the wrong
    /// shape read as a miss.
    fn lookup<T: ViewValue>(&self, store_key: &str) -> Option<T> {
        let cached = match self.store.get(store_key) {
            Ok(cached) => cached?,
            Err(e) => {
                self.metrics.record_store_error("get");
                warn!(
                    key = %store_key,
                    store = self.store.name(),
                    error = %e,
                    "Cache store read failed, recomputing"
                );
                return None;
            },
        };

        let decoded = T::from_cached(cached);
        if decoded.is_none() {
            warn!(key = %store_key, "Cached value has unexpected shape, recomputing");
        }
        decoded
    }
}

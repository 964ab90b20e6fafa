//! # Threadview Cache
//!
//! Memoization layer for the derived views of a post's discussion thread.
//!
//! A [`DerivedViewCache`] sits between a rendering layer and two
//! collaborators, a [`threadview_core::ThreadSource`] and a
//! [`threadview_core::ThreadRenderer`]. Each view is cached under a key built
//! from the thread fields it depends on, for a single configurable TTL.
//!
//! ## Example
//!
//! ```ignore
//! use threadview_cache::{DerivedViewCache, ViewCacheConfig};
//!
//! let config = ViewCacheConfig::load(None)?;
//! let cache = DerivedViewCache::from_config(&config, source, renderer);
//!
//! let ctx = ThreadContext::from_state(post, &state, requested_page);
//! let title = cache.title(&ctx)?;
//! let older = cache.previous_link(&ctx)?;
//! ```

pub mod cache;
pub mod config;
pub mod metrics;
pub mod store;

// Re-exports
pub use crate::cache::{CachedValue, DerivedViewCache, ViewKey, ViewKind};
pub use crate::config::{ConfigError, ViewCacheConfig};
pub use crate::metrics::{CacheMetrics, register_cache_metrics};
pub use crate::store::{MemoryStore, MokaStore, NullStore, StoreError, ViewStore};

// Re-export threadview_core for consumers
pub use threadview_core;

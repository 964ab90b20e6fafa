//! Derived-view cache.
//!
//! This module memoizes the views of a post's discussion thread (title,
//! responses, pagination links and flags) on top of a [`crate::store::ViewStore`],
//! with TTL-based expiration and keys that embed every field a view depends on.

pub mod keys;
pub mod value;
pub mod view_cache;

// Re-exports
pub use keys::{ViewKey, ViewKind};
pub use value::{CachedValue, ViewValue};
pub use view_cache::DerivedViewCache;

//! Threadview Core - Domain types and collaborator traits
//!
//! This crate provides the types describing a post's discussion thread and
//! the traits through which thread state and rendered views are obtained.

pub mod error;
pub mod source;
pub mod types;

// Re-exports
pub use error::{Result, ThreadError};
pub use source::{ThreadRenderer, ThreadSource};
pub use types::{PostId, ResponseCount, ThreadContext, ThreadState};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

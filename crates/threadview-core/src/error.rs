//! Error types for thread collaborators.
//!
//! Thread-state providers and renderers report failures with
//! [`ThreadError`]. The derived-view cache passes these through to its
//! callers unchanged.

use crate::types::PostId;

/// Errors raised by a thread-state provider or a renderer.
#[derive(Debug, thiserror::Error)]
pub enum ThreadError {
    /// The post does not exist or carries no thread.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// The thread-state backend could not be reached.
    #[error("thread source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    /// A view could not be rendered.
    #[error("failed to render {view}: {reason}")]
    Render { view: &'static str, reason: String },

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ThreadError {
    /// Creates a new source unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }

    /// Creates a new render error for the named view.
    pub fn render(view: &'static str, reason: impl Into<String>) -> Self {
        Self::Render {
            view,
            reason: reason.into(),
        }
    }

    /// Returns true if this is a transient error that might succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::SourceUnavailable { .. })
    }
}

/// Result alias for collaborator calls.
pub type Result<T> = std::result::Result<T, ThreadError>;

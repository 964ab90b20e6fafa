//! Collaborator traits.
//!
//! The derived-view cache never computes thread state or markup itself. It
//! asks a [`ThreadSource`] for the state of a post and a [`ThreadRenderer`]
//! for formatted output, and memoizes what they return.

use crate::error::Result;
use crate::types::{PostId, ResponseCount, ThreadContext, ThreadState};

/// A provider of thread state.
///
/// # Example
///
/// ```
/// use threadview_core::{PostId, ThreadSource, ThreadState, Result};
///
/// struct AlwaysOpen;
///
/// impl ThreadSource for AlwaysOpen {
///     fn thread_state(&self, _post: PostId) -> Result<ThreadState> {
///         Ok(ThreadState::default())
///     }
/// }
///
/// let state = AlwaysOpen.thread_state(PostId::new(1)).unwrap();
/// assert!(state.is_open);
/// ```
pub trait ThreadSource: Send + Sync {
    /// Returns the current state of the thread attached to `post`.
    ///
    /// # Errors
    ///
    /// - `ThreadError::PostNotFound` if the post doesn't exist
    /// - `ThreadError::SourceUnavailable` if the backend is not accessible
    fn thread_state(&self, post: PostId) -> Result<ThreadState>;

    /// Returns the name of this source, used in logs.
    fn name(&self) -> &str {
        "thread-source"
    }
}

/// Produces the formatted views of a thread, localization included.
pub trait ThreadRenderer: Send + Sync {
    /// Summary title, e.g. "One response to “Post”" or "3 responses to “Post”".
    fn title(&self, post: PostId, count: ResponseCount) -> Result<String>;

    /// Ordered list markup of the responses on the current page.
    fn responses(&self, ctx: &ThreadContext) -> Result<String>;

    /// Link to the previous page, or `None` on the first page.
    fn previous_link(&self, ctx: &ThreadContext) -> Result<Option<String>>;

    /// Link to the next page, or `None` on the last page.
    fn next_link(&self, ctx: &ThreadContext) -> Result<Option<String>>;
}

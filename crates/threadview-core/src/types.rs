//! Thread domain types.
//!
//! These types describe the state of a discussion thread attached to a post,
//! as seen by a single request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the content item owning a thread.
///
/// # Example
///
/// ```
/// use threadview_core::PostId;
///
/// let post = PostId::new(42);
/// assert_eq!(post.get(), 42);
/// assert_eq!(post.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(u64);

impl PostId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a thread as reported by the thread-state provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadState {
    /// Number of responses currently on the thread.
    pub response_count: u32,
    /// Number of pages the responses are split into.
    pub total_pages: u32,
    /// Whether the thread still accepts responses.
    pub is_open: bool,
    /// Whether the post's content type supports threads at all.
    pub supports_threads: bool,
    /// Site-level setting: split responses into pages.
    pub pagination_enabled: bool,
}

impl Default for ThreadState {
    fn default() -> Self {
        Self {
            response_count: 0,
            total_pages: 1,
            is_open: true,
            supports_threads: true,
            pagination_enabled: false,
        }
    }
}

/// Per-request view of a thread.
///
/// The page is 1-based; a requested page of `0` is read as page 1.
///
/// # Example
///
/// ```
/// use threadview_core::{PostId, ThreadContext};
///
/// let ctx = ThreadContext::new(PostId::new(7), 12).with_page(0);
/// assert_eq!(ctx.current_page(), 1);
/// assert_eq!(ctx.response_count(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadContext {
    post_id: PostId,
    response_count: u32,
    current_page: u32,
}

impl ThreadContext {
    /// Creates a context on the first page.
    pub fn new(post_id: PostId, response_count: u32) -> Self {
        Self {
            post_id,
            response_count,
            current_page: 1,
        }
    }

    /// Builds a context from a provider snapshot and the requested page, if any.
    pub fn from_state(post_id: PostId, state: &ThreadState, page: Option<u32>) -> Self {
        let ctx = Self::new(post_id, state.response_count);
        match page {
            Some(page) => ctx.with_page(page),
            None => ctx,
        }
    }

    /// Sets the current page. Zero falls back to page 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.current_page = page.max(1);
        self
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn response_count(&self) -> u32 {
        self.response_count
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_responses(&self) -> bool {
        self.response_count > 0
    }
}

/// Pluralization choice for a thread summary.
///
/// Exactly one response gets its own phrase; every other count, zero
/// included, is rendered numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCount {
    One,
    Many(u32),
}

impl ResponseCount {
    pub fn from_count(count: u32) -> Self {
        match count {
            1 => Self::One,
            n => Self::Many(n),
        }
    }

    pub fn count(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Many(n) => n,
        }
    }

    pub fn is_singular(self) -> bool {
        matches!(self, Self::One)
    }
}

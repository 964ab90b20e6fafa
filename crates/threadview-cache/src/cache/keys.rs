//! Cache key generation.
//!
//! Every derived view has one [`ViewKey`] variant carrying exactly the
//! thread fields its computation depends on. Keys are only built from a
//! [`ThreadContext`] through the constructors below, so when a computation
//! starts depending on a new field there is a single place to add it.

use std::fmt;

use threadview_core::{PostId, ThreadContext};

/// The derived views memoized by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Title,
    Responses,
    PreviousLink,
    NextLink,
    Paginated,
    Closed,
}

impl ViewKind {
    /// Key prefix, also used as the `view` metrics label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Responses => "responses",
            Self::PreviousLink => "prev-link",
            Self::NextLink => "next-link",
            Self::Paginated => "paginated",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key unica para una vista derivada.
///
/// # Examples
///
/// ```
/// use threadview_cache::cache::ViewKey;
/// use threadview_core::{PostId, ThreadContext};
///
/// let ctx = ThreadContext::new(PostId::new(42), 7).with_page(2);
/// assert_eq!(ViewKey::title(&ctx).to_string(), "title:42:7");
/// assert_eq!(ViewKey::responses(&ctx).to_string(), "responses:42:7:2");
/// assert_eq!(ViewKey::closed(&ctx).to_string(), "closed:42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKey {
    Title { post: PostId, count: u32 },
    Responses { post: PostId, count: u32, page: u32 },
    PreviousLink { post: PostId, page: u32 },
    NextLink { post: PostId, page: u32 },
    Paginated { post: PostId },
    Closed { post: PostId },
}

impl ViewKey {
    pub fn title(ctx: &ThreadContext) -> Self {
        Self::Title {
            post: ctx.post_id(),
            count: ctx.response_count(),
        }
    }

    pub fn responses(ctx: &ThreadContext) -> Self {
        Self::Responses {
            post: ctx.post_id(),
            count: ctx.response_count(),
            page: ctx.current_page(),
        }
    }

    pub fn previous_link(ctx: &ThreadContext) -> Self {
        Self::PreviousLink {
            post: ctx.post_id(),
            page: ctx.current_page(),
        }
    }

    pub fn next_link(ctx: &ThreadContext) -> Self {
        Self::NextLink {
            post: ctx.post_id(),
            page: ctx.current_page(),
        }
    }

    pub fn paginated(ctx: &ThreadContext) -> Self {
        Self::Paginated {
            post: ctx.post_id(),
        }
    }

    pub fn closed(ctx: &ThreadContext) -> Self {
        Self::Closed {
            post: ctx.post_id(),
        }
    }

    /// Retorna la vista a la que pertenece la key.
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Title { .. } => ViewKind::Title,
            Self::Responses { .. } => ViewKind::Responses,
            Self::PreviousLink { .. } => ViewKind::PreviousLink,
            Self::NextLink { .. } => ViewKind::NextLink,
            Self::Paginated { .. } => ViewKind::Paginated,
            Self::Closed { .. } => ViewKind::Closed,
        }
    }

    /// Retorna el post dueño del thread.
    pub fn post(&self) -> PostId {
        match *self {
            Self::Title { post, .. }
            | Self::Responses { post, .. }
            | Self::PreviousLink { post, .. }
            | Self::NextLink { post, .. }
            | Self::Paginated { post }
            | Self::Closed { post } => post,
        }
    }

    /// Renders the key as stored, prefixed by `namespace` when non-empty.
    pub fn to_store_key(&self, namespace: &str) -> String {
        if namespace.is_empty() {
            self.to_string()
        } else {
            format!("{}:{}", namespace, self)
        }
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Self::Title { post, count } => write!(f, "{}:{}:{}", kind, post, count),
            Self::Responses { post, count, page } => {
                write!(f, "{}:{}:{}:{}", kind, post, count, page)
            },
            Self::PreviousLink { post, page } | Self::NextLink { post, page } => {
                write!(f, "{}:{}:{}", kind, post, page)
            },
            Self::Paginated { post } | Self::Closed { post } => write!(f, "{}:{}", kind, post),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ctx(post: u64, count: u32, page: u32) -> ThreadContext {
        ThreadContext::new(PostId::new(post), count).with_page(page)
    }

    #[test]
    fn test_key_format() {
        let ctx = ctx(42, 7, 3);

        assert_eq!(ViewKey::title(&ctx).to_string(), "title:42:7");
        assert_eq!(ViewKey::responses(&ctx).to_string(), "responses:42:7:3");
        assert_eq!(ViewKey::previous_link(&ctx).to_string(), "prev-link:42:3");
        assert_eq!(ViewKey::next_link(&ctx).to_string(), "next-link:42:3");
        assert_eq!(ViewKey::paginated(&ctx).to_string(), "paginated:42");
        assert_eq!(ViewKey::closed(&ctx).to_string(), "closed:42");
    }

    #[test]
    fn test_store_key_namespace() {
        let key = ViewKey::title(&ctx(1, 2, 1));

        assert_eq!(key.to_store_key("threadview"), "threadview:title:1:2");
        assert_eq!(key.to_store_key(""), "title:1:2");
    }

    #[test]
    fn test_page_only_affects_page_keyed_views() {
        let first = ctx(5, 30, 1);
        let second = ctx(5, 30, 2);

        assert_eq!(ViewKey::title(&first), ViewKey::title(&second));
        assert_eq!(ViewKey::paginated(&first), ViewKey::paginated(&second));
        assert_eq!(ViewKey::closed(&first), ViewKey::closed(&second));

        assert_ne!(ViewKey::responses(&first), ViewKey::responses(&second));
        assert_ne!(
            ViewKey::previous_link(&first),
            ViewKey::previous_link(&second)
        );
        assert_ne!(ViewKey::next_link(&first), ViewKey::next_link(&second));
    }

    #[test]
    fn test_count_only_affects_count_keyed_views() {
        let before = ctx(5, 30, 2);
        let after = ctx(5, 31, 2);

        assert_ne!(ViewKey::title(&before), ViewKey::title(&after));
        assert_ne!(ViewKey::responses(&before), ViewKey::responses(&after));

        assert_eq!(
            ViewKey::previous_link(&before),
            ViewKey::previous_link(&after)
        );
        assert_eq!(ViewKey::next_link(&before), ViewKey::next_link(&after));
    }

    #[test]
    fn test_views_never_share_keys() {
        let ctx = ctx(8, 1, 1);
        let keys: HashSet<String> = [
            ViewKey::title(&ctx),
            ViewKey::responses(&ctx),
            ViewKey::previous_link(&ctx),
            ViewKey::next_link(&ctx),
            ViewKey::paginated(&ctx),
            ViewKey::closed(&ctx),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(keys.len(), 6);
    }

    #[test]
    fn test_kind_and_post_accessors() {
        let key = ViewKey::next_link(&ctx(77, 0, 4));

        assert_eq!(key.kind(), ViewKind::NextLink);
        assert_eq!(key.kind().as_str(), "next-link");
        assert_eq!(key.post(), PostId::new(77));
    }
}

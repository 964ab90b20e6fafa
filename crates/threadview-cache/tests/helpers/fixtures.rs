use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;
use threadview_cache::{DerivedViewCache, ViewCacheConfig, ViewStore};
use threadview_core::{
    PostId, ResponseCount, Result, ThreadContext, ThreadError, ThreadRenderer, ThreadSource,
    ThreadState,
};

/// Returns an open, non-paginated thread with `count` responses.
pub fn open_thread(count: u32) -> ThreadState {
    ThreadState {
        response_count: count,
        total_pages: 1,
        is_open: true,
        supports_threads: true,
        pagination_enabled: true,
    }
}

/// Thread source backed by a map, counting every lookup.
#[derive(Default)]
pub struct FixtureSource {
    threads: Mutex<HashMap<PostId, ThreadState>>,
    calls: AtomicU32,
    failing: AtomicBool,
}

impl FixtureSource {
    pub fn with_thread(post: PostId, state: ThreadState) -> Self {
        let source = Self::default();
        source.set_thread(post, state);
        source
    }

    pub fn set_thread(&self, post: PostId, state: ThreadState) {
        self.threads.lock().insert(post, state);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ThreadSource for FixtureSource {
    fn thread_state(&self, post: PostId) -> Result<ThreadState> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(ThreadError::unavailable("fixture offline"));
        }
        self.threads
            .lock()
            .get(&post)
            .cloned()
            .ok_or(ThreadError::PostNotFound(post))
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

/// English renderer in the shape of a blog theme, counting calls per view.
pub struct FixtureRenderer {
    source: Arc<FixtureSource>,
    titles: Mutex<HashMap<PostId, String>>,
    calls: Mutex<HashMap<&'static str, u32>>,
    failing: AtomicBool,
}

impl FixtureRenderer {
    pub fn new(source: Arc<FixtureSource>) -> Self {
        Self {
            source,
            titles: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_title(&self, post: PostId, title: &str) {
        self.titles.lock().insert(post, title.to_string());
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self, view: &str) -> u32 {
        self.calls.lock().get(view).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().values().sum()
    }

    fn enter(&self, view: &'static str) -> Result<()> {
        *self.calls.lock().entry(view).or_insert(0) += 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(ThreadError::render(view, "fixture renderer failing"));
        }
        Ok(())
    }

    fn post_title(&self, post: PostId) -> String {
        self.titles
            .lock()
            .get(&post)
            .cloned()
            .unwrap_or_else(|| format!("Post {}", post))
    }

    fn page_url(post: PostId, page: u32) -> String {
        format!("/posts/{}/comment-page-{}/#comments", post, page)
    }
}

/// Formats with comma thousands separators: 12345 -> "12,345".
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl ThreadRenderer for FixtureRenderer {
    fn title(&self, post: PostId, count: ResponseCount) -> Result<String> {
        self.enter("title")?;
        let title = self.post_title(post);
        Ok(match count {
            ResponseCount::One => format!("One response to &ldquo;{}&rdquo;", title),
            ResponseCount::Many(n) => {
                format!("{} responses to &ldquo;{}&rdquo;", group_thousands(n), title)
            },
        })
    }

    fn responses(&self, ctx: &ThreadContext) -> Result<String> {
        self.enter("responses")?;
        Ok(format!(
            "<ol class=\"comment-list\" data-post=\"{}\" data-page=\"{}\" data-count=\"{}\"></ol>",
            ctx.post_id(),
            ctx.current_page(),
            ctx.response_count()
        ))
    }

    fn previous_link(&self, ctx: &ThreadContext) -> Result<Option<String>> {
        self.enter("previous_link")?;
        if ctx.current_page() <= 1 {
            return Ok(None);
        }
        Ok(Some(format!(
            "<a href=\"{}\">&larr; Older comments</a>",
            Self::page_url(ctx.post_id(), ctx.current_page() - 1)
        )))
    }

    fn next_link(&self, ctx: &ThreadContext) -> Result<Option<String>> {
        self.enter("next_link")?;
        let state = self.source.thread_state(ctx.post_id())?;
        if ctx.current_page() >= state.total_pages {
            return Ok(None);
        }
        Ok(Some(format!(
            "<a href=\"{}\">Newer comments &rarr;</a>",
            Self::page_url(ctx.post_id(), ctx.current_page() + 1)
        )))
    }
}

/// Builds a cache over `store` with fresh fixtures for `post`.
pub fn cache_over(
    store: Arc<dyn ViewStore>,
    post: PostId,
    state: ThreadState,
) -> (DerivedViewCache, Arc<FixtureSource>, Arc<FixtureRenderer>) {
    let source = Arc::new(FixtureSource::with_thread(post, state));
    let renderer = Arc::new(FixtureRenderer::new(source.clone()));
    let cache = DerivedViewCache::new(
        &ViewCacheConfig::default(),
        store,
        source.clone(),
        renderer.clone(),
    );
    (cache, source, renderer)
}

//! The post list page: owns pagination state and runs the load-more flow

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::Result;
use tera::Context;
use thiserror::Error;

use super::state::PaginationState;
use super::view::{ListView, Presenter};
use crate::content::{ContentError, ContentSource, PostPage};
use crate::templates::TemplateRenderer;

/// Why `load_more` did not append anything
#[derive(Debug, Error)]
pub enum PageError {
    #[error("there are no more pages to load")]
    InvalidState,

    #[error("a page is already being loaded")]
    InFlight,

    #[error("failed to load more posts: {0}")]
    Fetch(#[from] ContentError),
}

/// Result of a load-more call that reached the content source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This many posts were appended
    Appended(usize),
    /// The page was fetched but the view had moved on, so it was dropped
    Discarded,
}

/// A list of post summaries that grows one page at a time
pub struct PostListPage {
    source: Arc<dyn ContentSource>,
    state: RwLock<PaginationState>,
    in_flight: AtomicBool,
    open: AtomicBool,
}

impl PostListPage {
    /// Build the page from the first page of results
    pub fn new(source: Arc<dyn ContentSource>, first_page: PostPage) -> Self {
        Self {
            source,
            state: RwLock::new(PaginationState::initialize(first_page)),
            in_flight: AtomicBool::new(false),
            open: AtomicBool::new(true),
        }
    }

    /// Fetch the next page and append its posts.
    ///
    /// Fails without fetching when nothing is left to load or another load is
    /// running. A failed fetch leaves the state untouched so the call can be
    /// retried.
    pub async fn load_more(&self) -> std::result::Result<LoadOutcome, PageError> {
        let _flight = InFlight::acquire(&self.in_flight).ok_or(PageError::InFlight)?;

        let pending = self.read_state().pending_url().map(str::to_string);
        let Some(url) = pending else {
            tracing::debug!("load_more called with no pages left");
            return Err(PageError::InvalidState);
        };

        tracing::debug!(url = %url, "Loading more posts");
        let page = self.source.fetch_page(&url).await.map_err(|e| {
            tracing::warn!("Loading more posts failed: {}", e);
            PageError::Fetch(e)
        })?;

        if !self.is_open() {
            tracing::debug!("Page closed while loading, dropping fetched posts");
            return Ok(LoadOutcome::Discarded);
        }

        let mut state = self.write_state();
        if state.next_page() != Some(url.as_str()) {
            tracing::debug!("Pagination moved on while loading, dropping fetched posts");
            return Ok(LoadOutcome::Discarded);
        }

        let count = page.results.len();
        let current = std::mem::take(&mut *state);
        *state = current.merge(page);
        tracing::info!(
            appended = count,
            total = state.posts().len(),
            has_more = state.has_more(),
            "Loaded more posts"
        );

        Ok(LoadOutcome::Appended(count))
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PaginationState {
        self.read_state().clone()
    }

    pub fn has_more(&self) -> bool {
        self.read_state().has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Tear the view down; loads still in flight will not touch the state
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// View model for the posts loaded so far
    pub fn view(&self, presenter: &Presenter) -> ListView {
        presenter.list(&self.read_state())
    }

    /// Render the page as HTML on top of a base template context
    pub fn render(
        &self,
        renderer: &TemplateRenderer,
        presenter: &Presenter,
        base: &Context,
    ) -> Result<String> {
        let mut context = base.clone();
        context.insert("page", &self.view(presenter));
        context.insert("blank_posts", &[presenter.blank()]);
        renderer.render("index.html", &context)
    }

    fn read_state(&self) -> RwLockReadGuard<'_, PaginationState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, PaginationState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a load as running; cleared on drop, including when the future is cancelled
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

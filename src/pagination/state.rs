//! Pagination state and the pure merge step

use serde::Serialize;

use crate::content::{PostPage, PostSummary};

/// Posts shown so far and where the next page lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    posts: Vec<PostSummary>,
    next_page: Option<String>,
    has_more: bool,
}

impl PaginationState {
    /// Seed state from the page rendered at build time
    pub fn initialize(page: PostPage) -> Self {
        let has_more = page.next_page.is_some();
        Self {
            posts: page.results,
            next_page: page.next_page,
            has_more,
        }
    }

    /// Append a fetched page.
    ///
    /// Existing posts keep their positions; the page's results follow in
    /// source order. Once `has_more` is false it stays false.
    pub fn merge(self, page: PostPage) -> Self {
        let has_more = self.has_more && page.has_next();

        let mut posts = self.posts;
        posts.extend(page.results);

        Self {
            posts,
            next_page: page.next_page,
            has_more,
        }
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// URL to fetch next, if loading more is currently allowed
    pub fn pending_url(&self) -> Option<&str> {
        if self.has_more {
            self.next_page()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> PostSummary {
        PostSummary {
            uid: Some(slug::slugify(title)),
            first_publication_date: Some("2021-03-15T00:00:00Z".to_string()),
            title: title.to_string(),
            subtitle: String::new(),
            author: "Autor".to_string(),
        }
    }

    fn page(titles: &[&str], next: Option<&str>, page: u32, total_pages: u32) -> PostPage {
        PostPage {
            results: titles.iter().map(|t| post(t)).collect(),
            next_page: next.map(str::to_string),
            page,
            total_pages,
        }
    }

    #[test]
    fn test_initialize() {
        let state = PaginationState::initialize(page(&["a"], Some("/api/posts?page=2"), 1, 2));
        assert_eq!(state.posts().len(), 1);
        assert_eq!(state.next_page(), Some("/api/posts?page=2"));
        assert!(state.has_more());

        let single = PaginationState::initialize(page(&["a"], None, 1, 1));
        assert!(!single.has_more());
        assert_eq!(single.pending_url(), None);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let state = PaginationState::initialize(page(&["a", "b"], Some("/p2"), 1, 3));
        let state = state.merge(page(&["c", "d"], Some("/p3"), 2, 3));

        let titles: Vec<_> = state.posts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c", "d"]);
        assert_eq!(state.next_page(), Some("/p3"));
        assert!(state.has_more());
    }

    #[test]
    fn test_multi_item_page_is_not_nested() {
        let state = PaginationState::initialize(page(&["a"], Some("/p2"), 1, 2));
        let state = state.merge(page(&["b", "c", "d"], None, 2, 2));
        assert_eq!(state.posts().len(), 4);
    }

    #[test]
    fn test_last_page_exhausts() {
        let state = PaginationState::initialize(page(&["a"], Some("/api/posts?page=2"), 1, 2));
        let state = state.merge(page(&["b"], None, 2, 2));
        assert_eq!(state.posts().len(), 2);
        assert!(!state.has_more());
    }

    #[test]
    fn test_next_page_without_remaining_pages_exhausts() {
        // The counters win over a stray next_page URL
        let state = PaginationState::initialize(page(&["a"], Some("/p2"), 1, 2));
        let state = state.merge(page(&["b"], Some("/p3"), 2, 2));
        assert!(!state.has_more());
        assert_eq!(state.pending_url(), None);
    }

    #[test]
    fn test_has_more_never_reenabled() {
        let state = PaginationState::initialize(page(&["a"], None, 1, 1));
        let state = state.merge(page(&["b"], Some("/p3"), 2, 5));
        assert!(!state.has_more());
    }

    #[test]
    fn test_append_only_law() {
        let mut state = PaginationState::initialize(page(&["p0"], Some("/p2"), 1, 6));
        let mut previous = state.posts().to_vec();

        for n in 2..=6u32 {
            let titles: Vec<String> = (0..n).map(|i| format!("p{}-{}", n, i)).collect();
            let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
            let next = (n < 6).then(|| format!("/p{}", n + 1));
            state = state.merge(page(&refs, next.as_deref(), n, 6));

            assert_eq!(state.posts().len(), previous.len() + n as usize);
            assert_eq!(&state.posts()[..previous.len()], previous.as_slice());
            previous = state.posts().to_vec();
        }

        assert!(!state.has_more());
    }
}

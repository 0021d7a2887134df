//! In-memory content source for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::client::ContentSource;
use super::error::{ContentError, Result};
use super::post::{PostPage, PostSummary};

/// Serves a fixed first page and follow-up pages keyed by URL
pub struct StaticSource {
    first: PostPage,
    pages: HashMap<String, PostPage>,
    requests: Mutex<Vec<String>>,
}

impl StaticSource {
    /// One page per title, linked by `/page/<n>` URLs
    pub fn paged(titles: &[&str]) -> Self {
        let total = titles.len() as u32;
        let mut pages: Vec<PostPage> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let number = i as u32 + 1;
                PostPage {
                    results: vec![summary(title)],
                    next_page: (number < total).then(|| format!("/page/{}", number + 1)),
                    page: number,
                    total_pages: total,
                }
            })
            .collect();

        let first = pages.remove(0);
        let pages = pages
            .into_iter()
            .map(|p| (format!("/page/{}", p.page), p))
            .collect();

        Self {
            first,
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make fetching `url` fail
    pub fn without_page(mut self, url: &str) -> Self {
        self.pages.remove(url);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

pub fn summary(title: &str) -> PostSummary {
    PostSummary {
        uid: Some(slug::slugify(title)),
        first_publication_date: Some("2021-03-15T00:00:00Z".to_string()),
        title: title.to_string(),
        subtitle: format!("Sobre {}", title),
        author: "Joseph Oliveira".to_string(),
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn first_page(&self) -> Result<PostPage> {
        Ok(self.first.clone())
    }

    async fn fetch_page(&self, url: &str) -> Result<PostPage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.pages.get(url).cloned().ok_or(ContentError::Api {
            status: 404,
            message: format!("no page at {}", url),
        })
    }
}

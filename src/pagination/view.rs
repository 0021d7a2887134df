//! View model for the post list

use serde::Serialize;

use super::state::PaginationState;
use crate::config::SiteConfig;
use crate::content::PostSummary;
use crate::helpers::{self, DateFormatter};
use crate::i18n::I18n;

/// One rendered entry of the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Localized publication date, or the placeholder
    pub date: String,
    /// Machine-readable publication date for `<time datetime>`
    pub datetime: Option<String>,
    pub href: String,
}

/// Everything the list template needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub posts: Vec<PostView>,
    pub has_more: bool,
    pub next_page: Option<String>,
}

/// Turns post summaries into display entries
#[derive(Debug, Clone)]
pub struct Presenter {
    config: SiteConfig,
    formatter: DateFormatter,
    no_date: String,
}

impl Presenter {
    pub fn new(config: &SiteConfig, i18n: &I18n) -> Self {
        Self {
            config: config.clone(),
            formatter: DateFormatter::from_config(config),
            no_date: i18n.get("no_date"),
        }
    }

    pub fn formatter(&self) -> &DateFormatter {
        &self.formatter
    }

    pub fn post(&self, post: &PostSummary) -> PostView {
        let raw_date = post.first_publication_date.as_deref();
        PostView {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            date: self.formatter.display(raw_date, &self.no_date),
            datetime: raw_date
                .and_then(|raw| helpers::parse_publication_date(raw).ok())
                .map(|d| d.to_rfc3339()),
            href: helpers::post_url(&self.config, post.uid.as_deref(), &post.title),
        }
    }

    pub fn list(&self, state: &PaginationState) -> ListView {
        ListView {
            posts: state.posts().iter().map(|p| self.post(p)).collect(),
            has_more: state.has_more(),
            next_page: state.pending_url().map(str::to_string),
        }
    }

    /// Empty entry used as the markup template for client-side appends
    pub fn blank(&self) -> PostView {
        PostView {
            title: String::new(),
            subtitle: String::new(),
            author: String::new(),
            date: String::new(),
            datetime: None,
            href: helpers::url_for(&self.config, &self.config.post_dir),
        }
    }
}

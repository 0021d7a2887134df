//! spacetravelling: a static blog front-end over a headless content API
//!
//! The generator queries the first page of posts at build time and renders
//! a static list page. More pages are appended on demand through the
//! [`pagination::PostListPage`] load-more flow.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod i18n;
pub mod pagination;
pub mod templates;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use content::{ContentSource, PrismicClient};

/// A site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Source directory (static assets)
    pub source_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
    /// Language override directory
    pub languages_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let languages_dir = base_dir.join("languages");

        Ok(Self {
            config,
            base_dir,
            source_dir,
            public_dir,
            languages_dir,
        })
    }

    /// Content API client for this site
    pub fn content_source(&self) -> Arc<dyn ContentSource> {
        Arc::new(PrismicClient::new(&self.config.prismic))
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

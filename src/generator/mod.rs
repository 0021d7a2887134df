//! Generator module - renders the static post list page

use anyhow::{Context as _, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use walkdir::WalkDir;

use crate::content::ContentSource;
use crate::i18n::I18n;
use crate::pagination::{PostListPage, Presenter};
use crate::templates::{self, TemplateRenderer, DEFAULT_LOGO};
use crate::Site;

/// Static site generator using the built-in templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    i18n: I18n,
    presenter: Presenter,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        let mut i18n = I18n::new(&site.config.language);
        i18n.load_languages(&site.languages_dir)?;

        let presenter = Presenter::new(&site.config, &i18n);

        Ok(Self {
            site: site.clone(),
            renderer,
            i18n,
            presenter,
        })
    }

    /// Generate the entire site from the content source
    pub async fn generate(&self, source: Arc<dyn ContentSource>) -> Result<PostListPage> {
        // Ensure public directory exists
        fs::create_dir_all(&self.site.public_dir)?;

        // Copy source assets (images, etc.)
        self.copy_source_assets()?;
        self.write_default_logo()?;

        let first_page = source
            .first_page()
            .await
            .context("Failed to query the first page of posts")?;
        tracing::info!(
            "Loaded {} posts (page {} of {})",
            first_page.results.len(),
            first_page.page,
            first_page.total_pages
        );

        let page = PostListPage::new(source, first_page);
        self.generate_index_page(&page)?;

        Ok(page)
    }

    /// Render and write `index.html`
    fn generate_index_page(&self, page: &PostListPage) -> Result<()> {
        let base = templates::base_context(
            &self.site.config,
            &self.i18n,
            self.presenter.formatter(),
        );
        let html = page.render(&self.renderer, &self.presenter, &base)?;

        let output_path = self.site.public_dir.join("index.html");
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);

        Ok(())
    }

    /// Write the built-in logo unless the site provides its own
    fn write_default_logo(&self) -> Result<()> {
        let Some(logo_path) = self.local_logo_path() else {
            return Ok(());
        };

        if logo_path.exists() {
            return Ok(());
        }

        if logo_path.extension().and_then(|e| e.to_str()) != Some("svg") {
            tracing::warn!(
                "Logo {:?} not found in {:?}",
                self.site.config.logo,
                self.site.source_dir
            );
            return Ok(());
        }

        if let Some(parent) = logo_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&logo_path, DEFAULT_LOGO)?;
        tracing::debug!("Wrote default logo to {:?}", logo_path);

        Ok(())
    }

    /// Where the configured logo lives in the output, if it is a local path
    fn local_logo_path(&self) -> Option<PathBuf> {
        let logo = self.site.config.logo.as_str();
        if logo.is_empty() || logo.contains("://") || logo.starts_with("//") {
            return None;
        }
        Some(self.site.public_dir.join(logo.trim_start_matches('/')))
    }

    /// Copy source assets (images, etc.) to public directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if path.is_file() {
                // Skip hidden files
                if path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'))
                {
                    continue;
                }

                let relative = path.strip_prefix(source_dir)?;
                let dest = self.site.public_dir.join(relative);

                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }

                fs::copy(path, &dest)?;
                copied += 1;
            }
        }

        tracing::debug!("Copied {} source assets", copied);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::StaticSource;

    fn site_in(dir: &std::path::Path) -> Site {
        Site::new(dir).unwrap()
    }

    #[tokio::test]
    async fn test_generate_writes_index_with_button() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_in(dir.path());
        let source = Arc::new(StaticSource::paged(&["Primeiro post", "Segundo post"]));

        let page = Generator::new(&site)
            .unwrap()
            .generate(source.clone())
            .await
            .unwrap();

        let html = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(html.contains("Primeiro post"));
        assert!(!html.contains("Segundo post"));
        assert!(html.contains("Carregar mais posts"));
        assert!(html.contains("data-next-page="));
        assert!(site.public_dir.join("images/logo.svg").exists());

        // The returned page continues where the static render stopped
        assert!(page.has_more());
        page.load_more().await.unwrap();
        assert_eq!(page.state().posts().len(), 2);
        assert_eq!(source.requests(), ["/page/2"]);
    }

    #[tokio::test]
    async fn test_single_page_has_no_button() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_in(dir.path());
        let source = Arc::new(StaticSource::paged(&["Único post"]));

        Generator::new(&site).unwrap().generate(source).await.unwrap();

        let html = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(html.contains("Único post"));
        assert!(!html.contains("Carregar mais posts"));
    }

    #[tokio::test]
    async fn test_source_assets_are_copied_and_logo_kept() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("source/images")).unwrap();
        fs::write(dir.path().join("source/images/logo.svg"), "<svg>custom</svg>").unwrap();
        fs::write(dir.path().join("source/favicon.png"), "png").unwrap();
        fs::write(dir.path().join("source/.DS_Store"), "junk").unwrap();

        let site = site_in(dir.path());
        let source = Arc::new(StaticSource::paged(&["Post"]));
        Generator::new(&site).unwrap().generate(source).await.unwrap();

        assert_eq!(
            fs::read_to_string(site.public_dir.join("images/logo.svg")).unwrap(),
            "<svg>custom</svg>"
        );
        assert!(site.public_dir.join("favicon.png").exists());
        assert!(!site.public_dir.join(".DS_Store").exists());
    }

    #[tokio::test]
    async fn test_language_override_is_rendered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("languages")).unwrap();
        fs::write(dir.path().join("languages/pt-BR.yml"), "load_more: Ver mais\n").unwrap();

        let site = site_in(dir.path());
        let source = Arc::new(StaticSource::paged(&["Um", "Dois"]));
        Generator::new(&site).unwrap().generate(source).await.unwrap();

        let html = fs::read_to_string(site.public_dir.join("index.html")).unwrap();
        assert!(html.contains("Ver mais"));
    }
}

//! List posts from the content API

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;

use crate::content::ContentSource;
use crate::i18n::I18n;
use crate::pagination::{LoadOutcome, PageError, PostListPage, Presenter};
use crate::Site;

/// How far to page through the posts
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Keep loading until the last page
    pub all: bool,
    /// Number of extra pages to load after the first
    pub pages: usize,
}

impl ListOptions {
    fn page_limit(&self) -> usize {
        if self.all {
            usize::MAX
        } else {
            self.pages
        }
    }
}

/// List posts from the configured content API on stdout
pub async fn run(site: &Site, options: ListOptions) -> Result<()> {
    let mut stdout = std::io::stdout();
    run_with_source(site, site.content_source(), options, &mut stdout).await
}

/// List posts from a given content source
pub async fn run_with_source<W: Write>(
    site: &Site,
    source: Arc<dyn ContentSource>,
    options: ListOptions,
    out: &mut W,
) -> Result<()> {
    let mut i18n = I18n::new(&site.config.language);
    i18n.load_languages(&site.languages_dir)?;
    let presenter = Presenter::new(&site.config, &i18n);

    let first_page = source.first_page().await?;
    let page = PostListPage::new(source, first_page);

    writeln!(out, "{}:", site.config.title)?;
    let mut shown = print_from(&page, &presenter, 0, out)?;

    let limit = options.page_limit();
    let mut loaded = 0;
    while page.has_more() && loaded < limit {
        match page.load_more().await {
            Ok(LoadOutcome::Appended(_)) => {
                loaded += 1;
                shown = print_from(&page, &presenter, shown, out)?;
            }
            Ok(LoadOutcome::Discarded) => break,
            Err(PageError::Fetch(e)) => {
                writeln!(out, "{} ({})", i18n.get("load_error"), e)?;
                break;
            }
            Err(e) => {
                tracing::debug!("Stopped loading: {}", e);
                break;
            }
        }
    }

    writeln!(out, "Posts ({})", shown)?;
    if page.has_more() {
        writeln!(out, "{}: --all", i18n.get("load_more"))?;
    }

    Ok(())
}

/// Print posts starting at index `from`; returns how many are shown in total
fn print_from<W: Write>(
    page: &PostListPage,
    presenter: &Presenter,
    from: usize,
    out: &mut W,
) -> Result<usize> {
    let view = page.view(presenter);
    for post in view.posts.iter().skip(from) {
        writeln!(
            out,
            "  {} - {} [{}] {}",
            post.date, post.title, post.author, post.href
        )?;
        if !post.subtitle.is_empty() {
            writeln!(out, "      {}", post.subtitle)?;
        }
    }
    Ok(view.posts.len())
}

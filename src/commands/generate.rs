//! Generate static files

use anyhow::Result;
use std::sync::Arc;

use crate::content::ContentSource;
use crate::generator::Generator;
use crate::Site;

/// Generate the static site from the configured content API
pub async fn run(site: &Site) -> Result<()> {
    run_with_source(site, site.content_source()).await
}

/// Generate the static site from a given content source
pub async fn run_with_source(site: &Site, source: Arc<dyn ContentSource>) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(site)?;
    let page = generator.generate(source).await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} posts in {:.2}s (more pages: {})",
        page.state().posts().len(),
        duration.as_secs_f64(),
        page.has_more()
    );

    Ok(())
}

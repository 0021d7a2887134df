//! Built-in templates using the Tera template engine
//!
//! Templates and the default logo are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{self, DateFormatter, FormatPart};
use crate::i18n::I18n;

/// Logo written to `public/images/logo.svg` when the site does not ship one
pub const DEFAULT_LOGO: &str = include_str!("theme/images/logo.svg");

/// Template renderer with the embedded theme loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Content comes from a remote API, so escape it
        tera.autoescape_on(vec![".html"]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("theme/partials/header.html"),
            ),
            ("partials/post.html", include_str!("theme/partials/post.html")),
            (
                "partials/load_more.html",
                include_str!("theme/partials/load_more.html"),
            ),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Context shared by every rendered page
pub fn base_context(config: &SiteConfig, i18n: &I18n, formatter: &DateFormatter) -> Context {
    let mut context = Context::new();
    context.insert("site", &SiteData::new(config, i18n));
    context.insert("strings", &UiStrings::new(i18n));
    context.insert("client", &ClientData::new(config, formatter));
    context
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub language: String,
    pub root_url: String,
    pub logo_url: String,
    pub canonical_url: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig, i18n: &I18n) -> Self {
        Self {
            title: config.title.clone(),
            language: i18n.language().to_string(),
            root_url: helpers::url_for(config, "/"),
            logo_url: helpers::url_for(config, &config.logo),
            canonical_url: helpers::full_url_for(config, "/"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UiStrings {
    pub load_more: String,
    pub loading: String,
    pub load_error: String,
    pub no_date: String,
    pub logo_alt: String,
    pub home: String,
}

impl UiStrings {
    pub fn new(i18n: &I18n) -> Self {
        Self {
            load_more: i18n.get("load_more"),
            loading: i18n.get("loading"),
            load_error: i18n.get("load_error"),
            no_date: i18n.get("no_date"),
            logo_alt: i18n.get("header.logo_alt"),
            home: i18n.get("header.home"),
        }
    }
}

/// Settings the load-more script needs to format appended posts like the server does
#[derive(Debug, Clone, Serialize)]
pub struct ClientData {
    pub date_parts: Vec<FormatPart>,
    pub months: Vec<String>,
    pub month_names: Vec<String>,
    pub weekdays: Vec<String>,
    pub weekday_names: Vec<String>,
    pub timezone: String,
    pub post_prefix: String,
}

impl ClientData {
    pub fn new(config: &SiteConfig, formatter: &DateFormatter) -> Self {
        Self {
            date_parts: formatter.parts().to_vec(),
            months: formatter.month_abbreviations(),
            month_names: formatter.month_names(),
            weekdays: formatter.weekday_abbreviations(),
            weekday_names: formatter.weekday_names(),
            timezone: formatter.timezone_name().to_string(),
            post_prefix: format!(
                "{}/",
                helpers::url_for(config, &config.post_dir).trim_end_matches('/')
            ),
        }
    }
}

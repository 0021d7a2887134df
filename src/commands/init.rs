//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::ACCESS_TOKEN_ENV;
use crate::templates::DEFAULT_LOGO;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("source/images"))?;
    fs::create_dir_all(target_dir.join("languages"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        tracing::warn!("{:?} already exists, leaving it untouched", config_path);
    } else {
        fs::write(&config_path, default_config())?;
    }

    let logo_path = target_dir.join("source/images/logo.svg");
    if !logo_path.exists() {
        fs::write(&logo_path, DEFAULT_LOGO)?;
    }

    Ok(())
}

fn default_config() -> String {
    format!(
        r#"# Spacetravelling Configuration

# Site
title: Spacetravelling
language: pt-BR
timezone: ''

# URL
url: http://localhost:3000
root: /
post_dir: post

# Directory
source_dir: source
public_dir: public

# Header
logo: /images/logo.svg

# Date format
date_format: DD MMM YYYY

# Content API
prismic:
  endpoint: https://spacetravelling.cdn.prismic.io/api/v2
  # Leave empty to read {env}
  access_token: ''
  document_type: post
  fields:
    - title
    - subtitle
    - author
  page_size: 1
"#,
        env = ACCESS_TOKEN_ENV
    )
}

//! Interface strings, with built-in pt-BR and en tables

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

type Table = HashMap<String, serde_yaml::Value>;

const PT_BR: &str = r#"
load_more: Carregar mais posts
loading: Carregando...
load_error: Não foi possível carregar mais posts. Tente novamente.
no_date: Data indisponível
header:
  logo_alt: logo
  home: Página inicial
"#;

const EN: &str = r#"
load_more: Load more posts
loading: Loading...
load_error: Could not load more posts. Please try again.
no_date: Date unavailable
header:
  logo_alt: logo
  home: Home
"#;

/// Fallback language
const DEFAULT_LANGUAGE: &str = "en";

/// Internationalization handler
pub struct I18n {
    /// Current language
    language: String,
    /// Language data: lang -> key -> translation
    translations: HashMap<String, Table>,
}

impl I18n {
    /// Create a handler seeded with the built-in tables
    pub fn new(language: &str) -> Self {
        let mut translations = HashMap::new();
        for (lang, source) in [("pt-BR", PT_BR), ("en", EN)] {
            match serde_yaml::from_str::<Table>(source) {
                Ok(table) => {
                    translations.insert(lang.to_string(), table);
                }
                Err(e) => tracing::error!("Built-in {} strings are malformed: {}", lang, e),
            }
        }

        Self {
            language: language.to_string(),
            translations,
        }
    }

    /// Load `<lang>.yml` files from a directory, overriding built-in keys
    pub fn load_languages<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("yml") | Some("yaml")) {
                continue;
            }

            let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let content = fs::read_to_string(&path)?;
            match serde_yaml::from_str::<Table>(&content) {
                Ok(data) => {
                    self.translations
                        .entry(lang.to_string())
                        .or_default()
                        .extend(data);
                    tracing::debug!("Loaded language file: {:?}", path);
                }
                Err(e) => {
                    tracing::warn!("Failed to parse language file {:?}: {}", path, e);
                }
            }
        }

        Ok(())
    }

    /// Get the current language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Get a translation by key; nested keys use dots, e.g. "header.logo_alt"
    pub fn get(&self, key: &str) -> String {
        self.lookup_chain()
            .iter()
            .filter_map(|lang| self.translations.get(*lang))
            .find_map(|table| get_nested_value(table, key))
            .map(yaml_value_to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Languages consulted for a key: exact tag, its primary subtag, then the default
    fn lookup_chain(&self) -> Vec<&str> {
        let mut chain = vec![self.language.as_str()];
        if let Some((primary, _)) = self.language.split_once('-') {
            chain.push(primary);
        }
        if !chain.contains(&DEFAULT_LANGUAGE) {
            chain.push(DEFAULT_LANGUAGE);
        }
        chain
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

/// Get a nested value from a YAML map using dot notation
fn get_nested_value<'a>(data: &'a Table, key: &str) -> Option<&'a serde_yaml::Value> {
    let mut parts = key.split('.');
    let mut current = data.get(parts.next()?);

    for part in parts {
        match current {
            Some(serde_yaml::Value::Mapping(map)) => {
                current = map.get(serde_yaml::Value::String(part.to_string()));
            }
            _ => return None,
        }
    }

    current
}

/// Convert a YAML value to a string
fn yaml_value_to_string(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => String::new(),
        _ => format!("{:?}", value),
    }
}

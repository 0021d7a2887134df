//! Date helper functions

use chrono::{DateTime, FixedOffset, Locale, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

use crate::config::SiteConfig;

/// Why a publication date could not be formatted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("publication date is missing")]
    Missing,

    #[error("invalid publication date: {0}")]
    Invalid(String),
}

/// Moment.js tokens and their chrono equivalents, longest first within each family.
///
/// The load-more script handles exactly these tokens.
pub const DATE_TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("dddd", "%A"),
    ("ddd", "%a"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// A piece of a parsed date format
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPart {
    Token(&'static str),
    Literal(String),
}

/// Localized formatter for publication dates
#[derive(Debug, Clone)]
pub struct DateFormatter {
    parts: Vec<FormatPart>,
    format: String,
    locale: Locale,
    timezone: Tz,
}

impl DateFormatter {
    /// Create a formatter from a Moment.js-style format, a language tag and a timezone name
    pub fn new(format: &str, language: &str, timezone: &str) -> Self {
        let parts = parse_moment_format(format);
        Self {
            format: chrono_format(&parts),
            parts,
            locale: parse_locale(language),
            timezone: parse_timezone(timezone),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.date_format, &config.language, &config.timezone)
    }

    /// Format a raw publication date as sent by the content API
    pub fn format(&self, raw: Option<&str>) -> Result<String, FormatError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());
        let date = parse_publication_date(raw.ok_or(FormatError::Missing)?)?;
        Ok(format_date(
            &date.with_timezone(&self.timezone),
            &self.format,
            self.locale,
        ))
    }

    /// Format a date, substituting `placeholder` when it is missing or malformed
    pub fn display(&self, raw: Option<&str>, placeholder: &str) -> String {
        match self.format(raw) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!("Using date placeholder: {}", e);
                placeholder.to_string()
            }
        }
    }

    /// The parsed format, shared with the load-more script
    pub fn parts(&self) -> &[FormatPart] {
        &self.parts
    }

    /// Abbreviated month names (January first) in the formatter's locale
    pub fn month_abbreviations(&self) -> Vec<String> {
        self.month_table("%b")
    }

    /// Full month names (January first)
    pub fn month_names(&self) -> Vec<String> {
        self.month_table("%B")
    }

    /// Abbreviated weekday names (Sunday first)
    pub fn weekday_abbreviations(&self) -> Vec<String> {
        self.weekday_table("%a")
    }

    /// Full weekday names (Sunday first)
    pub fn weekday_names(&self) -> Vec<String> {
        self.weekday_table("%A")
    }

    fn month_table(&self, spec: &str) -> Vec<String> {
        (1..=12)
            .filter_map(|m| Utc.with_ymd_and_hms(2000, m, 1, 0, 0, 0).single())
            .map(|d| format_date(&d, spec, self.locale))
            .collect()
    }

    fn weekday_table(&self, spec: &str) -> Vec<String> {
        // 2000-01-02 was a Sunday
        (2..=8)
            .filter_map(|d| Utc.with_ymd_and_hms(2000, 1, d, 0, 0, 0).single())
            .map(|d| format_date(&d, spec, self.locale))
            .collect()
    }

    /// IANA name of the timezone dates are shown in
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

/// Format a date with a chrono format string in the given locale
pub fn format_date<Tz2: TimeZone>(date: &DateTime<Tz2>, format: &str, locale: Locale) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format_localized(format, locale).to_string()
}

/// Parse a publication timestamp.
///
/// Accepts RFC 3339 as well as the `+0000` offsets the content API emits
/// (e.g. `2021-03-15T19:25:28+0000`).
pub fn parse_publication_date(raw: &str) -> Result<DateTime<FixedOffset>, FormatError> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|_| FormatError::Invalid(raw.to_string()))
}

/// Map a language tag like `pt-BR` to a chrono locale
fn parse_locale(language: &str) -> Locale {
    let tag = language.replace('-', "_");
    Locale::try_from(tag.as_str()).unwrap_or_else(|_| {
        tracing::warn!("Unknown locale {:?}, falling back to POSIX", language);
        Locale::POSIX
    })
}

fn parse_timezone(name: &str) -> Tz {
    if name.trim().is_empty() {
        return Tz::UTC;
    }
    name.parse::<Tz>().unwrap_or_else(|_| {
        tracing::warn!("Unknown timezone {:?}, falling back to UTC", name);
        Tz::UTC
    })
}

/// Split a Moment.js-style format into tokens and literal text
pub fn parse_moment_format(format: &str) -> Vec<FormatPart> {
    let mut parts = Vec::new();
    let mut rest = format;

    while let Some(c) = rest.chars().next() {
        if let Some((token, _)) = DATE_TOKENS.iter().find(|(t, _)| rest.starts_with(t)) {
            parts.push(FormatPart::Token(*token));
            rest = &rest[token.len()..];
            continue;
        }

        match parts.last_mut() {
            Some(FormatPart::Literal(text)) => text.push(c),
            _ => parts.push(FormatPart::Literal(c.to_string())),
        }
        rest = &rest[c.len_utf8()..];
    }

    parts
}

/// Render parsed parts as a chrono format string
fn chrono_format(parts: &[FormatPart]) -> String {
    let mut result = String::new();
    for part in parts {
        match part {
            FormatPart::Token(token) => {
                if let Some((_, spec)) = DATE_TOKENS.iter().find(|(t, _)| t == token) {
                    result.push_str(spec);
                }
            }
            FormatPart::Literal(text) => result.push_str(&text.replace('%', "%%")),
        }
    }
    result
}

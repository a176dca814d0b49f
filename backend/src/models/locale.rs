use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::utils::ConfigError;

/// Site languages. Every locale the site can ever serve is a variant here;
/// which of them are live is decided by [`LocaleConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
    Es,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Fr, Locale::En, Locale::Es];

    /// Two-letter code used in URLs, storage and `<html lang>`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Exact, case-sensitive lookup by code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown locale code: {0}")]
pub struct ParseLocaleError(pub String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| ParseLocaleError(s.to_string()))
    }
}

/// The ordered set of supported locales and the default among them.
///
/// Built once at startup and handed to every component that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    supported: Vec<Locale>,
    default: Locale,
}

impl LocaleConfig {
    /// Duplicates are dropped, keeping first-appearance order.
    pub fn new(supported: Vec<Locale>, default: Locale) -> Result<Self, ConfigError> {
        let mut unique = Vec::with_capacity(supported.len());
        for locale in supported {
            if !unique.contains(&locale) {
                unique.push(locale);
            }
        }

        if unique.is_empty() {
            return Err(ConfigError::EmptyLocaleSet);
        }
        if !unique.contains(&default) {
            return Err(ConfigError::DefaultNotSupported(default));
        }

        Ok(Self { supported: unique, default })
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    pub fn default_locale(&self) -> Locale {
        self.default
    }

    pub fn supports(&self, locale: Locale) -> bool {
        self.supported.contains(&locale)
    }

    /// Membership test on a raw code: the code must name a supported locale exactly.
    pub fn find(&self, code: &str) -> Option<Locale> {
        Locale::from_code(code).filter(|locale| self.supports(*locale))
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self { supported: Locale::ALL.to_vec(), default: Locale::Fr }
    }
}

/// One `tag;q=value` segment of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleQualityEntry {
    /// First two characters of the tag, lower-cased.
    pub code: String,
    pub quality: f32,
}

/// A request path split into segments, with its locale prefix if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePath {
    pub segments: Vec<String>,
    pub has_locale_prefix: bool,
    pub prefix_locale: Option<Locale>,
}

impl RoutePath {
    pub fn parse(path: &str, locales: &LocaleConfig) -> Self {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        // Only the raw first piece counts: `//fr` is not prefixed.
        let prefix_locale = trimmed.split('/').next().and_then(|first| locales.find(first));

        let segments = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self { segments, has_locale_prefix: prefix_locale.is_some(), prefix_locale }
    }
}

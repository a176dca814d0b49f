//! Canonical locale routing
//!
//! Decides for every inbound request whether it is already canonical
//! (locale-prefixed or exempt) or needs exactly one redirect to become so.

use axum::http::StatusCode;
use serde::Deserialize;

use crate::models::{Locale, LocaleConfig, RoutePath};
use crate::services::negotiator::negotiate_header;
use crate::utils::ConfigError;

/// How a request for `/` is redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootRedirectPolicy {
    /// Negotiate from `Accept-Language`; temporary, varies per visitor.
    #[default]
    Negotiate,
    /// Always the default locale; permanent.
    FixedDefault,
}

impl std::str::FromStr for RootRedirectPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "negotiate" => Ok(Self::Negotiate),
            "fixed" | "fixed_default" => Ok(Self::FixedDefault),
            other => Err(ConfigError::InvalidRootPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStatus {
    /// 301, unprefixed path to its default-locale page
    MovedPermanently,
    /// 307, header-negotiated root
    Temporary,
    /// 308, root to the fixed default locale
    Permanent,
}

impl RedirectStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::MovedPermanently => StatusCode::MOVED_PERMANENTLY,
            Self::Temporary => StatusCode::TEMPORARY_REDIRECT,
            Self::Permanent => StatusCode::PERMANENT_REDIRECT,
        }
    }

    pub fn is_permanent(self) -> bool {
        !matches!(self, Self::Temporary)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub status: RedirectStatus,
    /// The target was chosen from `Accept-Language`
    pub vary_accept_language: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve as-is. `locale` is set for locale-prefixed pages and `None`
    /// for exempt paths.
    PassThrough { locale: Option<Locale> },
    Redirect(Redirect),
}

#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub locales: LocaleConfig,
    pub root_policy: RootRedirectPolicy,
    /// Path prefixes that are never localized, e.g. `/api`
    pub exempt_prefixes: Vec<String>,
    /// Exact well-known file paths, e.g. `/robots.txt`
    pub exempt_files: Vec<String>,
}

impl RouterConfig {
    pub fn new(
        locales: LocaleConfig,
        root_policy: RootRedirectPolicy,
        exempt_prefixes: Vec<String>,
        exempt_files: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let mut prefixes = Vec::with_capacity(exempt_prefixes.len());
        for prefix in exempt_prefixes {
            let trimmed = prefix.trim_end_matches('/');
            if !trimmed.starts_with('/') || trimmed.len() < 2 {
                return Err(ConfigError::InvalidExemptPrefix(prefix));
            }
            // An exempt `/fr` would swallow every French page
            let first = trimmed[1..].split('/').next().unwrap_or_default();
            if Locale::from_code(first).is_some() {
                return Err(ConfigError::PrefixShadowsLocale(prefix));
            }
            prefixes.push(trimmed.to_string());
        }

        Ok(Self { locales, root_policy, exempt_prefixes: prefixes, exempt_files })
    }

    /// Paths that are served as-is and never carry a locale prefix.
    pub fn is_exempt(&self, path: &str) -> bool {
        path.contains('.')
            || self.exempt_files.iter().any(|file| file == path)
            || self.exempt_prefixes.iter().any(|prefix| {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
            })
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            locales: LocaleConfig::default(),
            root_policy: RootRedirectPolicy::default(),
            exempt_prefixes: default_exempt_prefixes(),
            exempt_files: default_exempt_files(),
        }
    }
}

pub fn default_exempt_prefixes() -> Vec<String> {
    vec!["/_app".to_string(), "/api".to_string(), "/assets".to_string()]
}

pub fn default_exempt_files() -> Vec<String> {
    vec!["/robots.txt".to_string(), "/sitemap.xml".to_string()]
}

#[derive(Debug, Clone)]
pub struct EdgeRouter {
    config: RouterConfig,
}

impl EdgeRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn locales(&self) -> &LocaleConfig {
        &self.config.locales
    }

    /// Route a request path. `query` is carried over onto redirects.
    pub fn route(
        &self,
        path: &str,
        query: Option<&str>,
        accept_language: Option<&str>,
    ) -> RouteDecision {
        if self.is_exempt(path) {
            tracing::debug!("Exempt path, passing through: {}", path);
            return RouteDecision::PassThrough { locale: None };
        }

        let route_path = RoutePath::parse(path, &self.config.locales);
        if let Some(locale) = route_path.prefix_locale {
            return RouteDecision::PassThrough { locale: Some(locale) };
        }

        let redirect = if path == "/" {
            self.root_redirect(accept_language)
        } else {
            let separator = if path.starts_with('/') { "" } else { "/" };
            Redirect {
                location: format!("/{}{}{}", self.config.locales.default_locale(), separator, path),
                status: RedirectStatus::MovedPermanently,
                vary_accept_language: false,
            }
        };

        let redirect = Redirect { location: append_query(redirect.location, query), ..redirect };
        tracing::debug!(
            "Redirecting {} -> {} ({})",
            path,
            redirect.location,
            redirect.status.status_code()
        );
        RouteDecision::Redirect(redirect)
    }

    fn root_redirect(&self, accept_language: Option<&str>) -> Redirect {
        match self.config.root_policy {
            RootRedirectPolicy::Negotiate => {
                let locale = negotiate_header(accept_language, &self.config.locales);
                Redirect {
                    location: format!("/{}", locale),
                    status: RedirectStatus::Temporary,
                    vary_accept_language: true,
                }
            },
            RootRedirectPolicy::FixedDefault => Redirect {
                location: format!("/{}", self.config.locales.default_locale()),
                status: RedirectStatus::Permanent,
                vary_accept_language: false,
            },
        }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.config.is_exempt(path)
    }
}

fn append_query(location: String, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", location, query),
        _ => location,
    }
}

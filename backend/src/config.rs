use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::{Locale, LocaleConfig};
use crate::services::edge_router::{default_exempt_files, default_exempt_prefixes};
use crate::services::{PREFERENCE_KEY, PersistPolicy, RootRedirectPolicy, RouterConfig, StoreSettings};
use crate::utils::ConfigError;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub static_config: StaticConfig,
    pub locale: LocaleSection,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Absolute site origin used in robots.txt and the sitemap
    pub public_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub enabled: bool,
    pub web_root: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleSection {
    /// Ordered list of live locales
    pub supported: Vec<Locale>,
    pub default: Locale,
    pub root_redirect: RootRedirectPolicy,
    pub exempt_prefixes: Vec<String>,
    pub exempt_files: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Client-side fallback when the browser language is unsupported
    pub fallback: Locale,
    pub storage_key: String,
    pub persist_policy: PersistPolicy,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = match path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(config_path) => Self::from_toml(Path::new(&config_path))?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_PUBLIC_URL: Public site origin (default: http://localhost:8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,polyglot_site=debug")
    /// - APP_SUPPORTED_LOCALES: Comma-separated locale codes (e.g., "fr,en,es")
    /// - APP_DEFAULT_LOCALE: Default locale code (e.g., "fr")
    /// - APP_ROOT_REDIRECT: Root redirect policy ("negotiate" or "fixed")
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Some(port) = lookup("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Some(url) = lookup("APP_PUBLIC_URL") {
            self.server.public_url = url;
            tracing::info!("Override server.public_url from env: {}", self.server.public_url);
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Some(list) = lookup("APP_SUPPORTED_LOCALES") {
            match parse_locale_list(&list) {
                Ok(locales) => {
                    self.locale.supported = locales;
                    tracing::info!(
                        "Override locale.supported from env: {:?}",
                        self.locale.supported
                    );
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_SUPPORTED_LOCALES '{}': {} (keep {:?})",
                    list,
                    e,
                    self.locale.supported
                ),
            }
        }

        if let Some(code) = lookup("APP_DEFAULT_LOCALE") {
            match code.trim().parse::<Locale>() {
                Ok(locale) => {
                    self.locale.default = locale;
                    tracing::info!("Override locale.default from env: {}", locale);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_DEFAULT_LOCALE '{}': {} (keep {})",
                    code,
                    e,
                    self.locale.default
                ),
            }
        }

        if let Some(policy) = lookup("APP_ROOT_REDIRECT") {
            match policy.parse::<RootRedirectPolicy>() {
                Ok(val) => {
                    self.locale.root_redirect = val;
                    tracing::info!("Override locale.root_redirect from env: {:?}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_ROOT_REDIRECT '{}': {} (keep {:?})",
                    policy,
                    e,
                    self.locale.root_redirect
                ),
            }
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        // Validate server port
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.server.public_url.ends_with('/') {
            tracing::warn!("server.public_url should not end with '/': {}", self.server.public_url);
        }

        // Locale set, exempt prefixes and client fallback
        self.router_config()?;
        self.store_settings()?;

        Ok(())
    }

    pub fn locale_config(&self) -> Result<LocaleConfig, ConfigError> {
        LocaleConfig::new(self.locale.supported.clone(), self.locale.default)
    }

    pub fn router_config(&self) -> Result<RouterConfig, ConfigError> {
        RouterConfig::new(
            self.locale_config()?,
            self.locale.root_redirect,
            self.locale.exempt_prefixes.clone(),
            self.locale.exempt_files.clone(),
        )
    }

    pub fn store_settings(&self) -> Result<StoreSettings, ConfigError> {
        if !self.locale_config()?.supports(self.client.fallback) {
            return Err(ConfigError::FallbackNotSupported(self.client.fallback));
        }

        Ok(StoreSettings {
            fallback: self.client.fallback,
            storage_key: self.client.storage_key.clone(),
            persist_policy: self.client.persist_policy,
        })
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,polyglot_site=debug".to_string(),
            file: Some("logs/polyglot-site.log".to_string()),
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { enabled: true, web_root: "web".to_string() }
    }
}

impl Default for LocaleSection {
    fn default() -> Self {
        Self {
            supported: Locale::ALL.to_vec(),
            default: Locale::Fr,
            root_redirect: RootRedirectPolicy::default(),
            exempt_prefixes: default_exempt_prefixes(),
            exempt_files: default_exempt_files(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            fallback: Locale::En,
            storage_key: PREFERENCE_KEY.to_string(),
            persist_policy: PersistPolicy::default(),
        }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_locale_list(input: &str) -> Result<Vec<Locale>, ConfigError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(|code| code.parse::<Locale>().map_err(|_| ConfigError::UnknownLocale(code.to_string())))
        .collect()
}

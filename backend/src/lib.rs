//! Locale resolution and routing for a multi-locale marketing site.
//!
//! - [`services::negotiator`] picks a locale from `Accept-Language`
//! - [`services::edge_router`] enforces one canonical, locale-prefixed URL per page
//! - [`services::locale_store`] keeps the client-side preference
//! - [`utils::link`] rewrites internal links for the active locale

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

// Translation catalogs for UI and error messages, embedded at compile time.
rust_i18n::i18n!("locales", fallback = "en");

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::models::LocaleConfig;
use crate::services::{
    ContactSink, EdgeRouter, LoggingContactSink, PageRenderer, ShellRenderer, StoreSettings,
};
use crate::utils::{ConfigError, LinkLocalizer};

/// Shared, immutable per-process state
pub struct AppState {
    pub locales: LocaleConfig,
    pub router: Arc<EdgeRouter>,
    pub links: LinkLocalizer,
    /// Handed to the client locale store through `/api/locale` and the page shell
    pub client: StoreSettings,
    pub renderer: Arc<dyn PageRenderer>,
    pub contact: Arc<dyn ContactSink>,
    pub public_url: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let router_config = config.router_config()?;
        let locales = router_config.locales.clone();

        Ok(Self {
            links: LinkLocalizer::new(&router_config)?,
            client: config.store_settings()?,
            locales,
            router: Arc::new(EdgeRouter::new(router_config)),
            renderer: Arc::new(ShellRenderer),
            contact: Arc::new(LoggingContactSink),
            public_url: config.server.public_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Build the HTTP application with every request routed through the edge router.
pub fn create_router(state: Arc<AppState>, config: &Config) -> Router {
    let mut app = Router::new()
        .route("/api/locale", get(handlers::locale::get_locale_info))
        .route("/api/locale/localize", get(handlers::locale::localize_link))
        .route("/api/contact", post(handlers::contact::submit_contact))
        .route("/api/openapi.json", get(handlers::openapi_json))
        .route("/robots.txt", get(handlers::pages::robots))
        .route("/sitemap.xml", get(handlers::pages::sitemap));

    if config.static_config.enabled {
        tracing::info!("Serving static assets from {}", config.static_config.web_root);
        app = app.nest_service("/assets", ServeDir::new(&config.static_config.web_root));
    }

    app.fallback(handlers::pages::page)
        .layer(from_fn_with_state(Arc::clone(&state.router), middleware::edge_router_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

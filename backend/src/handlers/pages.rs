use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    http::{
        StatusCode, Uri,
        header::{CONTENT_LANGUAGE, CONTENT_TYPE},
    },
    response::{Html, IntoResponse, Response},
};

use crate::AppState;
use crate::middleware::ResolvedLocale;
use crate::services::{RenderContext, SITE_PAGES};
use crate::utils::ApiError;

/// Catch-all for page routes.
///
/// Only canonical, locale-prefixed paths carry a URL locale here; anything
/// else reaching this handler is an unknown exempt path.
pub async fn page(
    State(state): State<Arc<AppState>>,
    url_locale: Option<Extension<ResolvedLocale>>,
    negotiated: ResolvedLocale,
    uri: Uri,
) -> Response {
    let path = uri.path();

    let Some(Extension(ResolvedLocale(locale))) = url_locale else {
        tracing::debug!("No page for exempt path {}", path);
        return ApiError::not_found(path).in_locale(negotiated.0).into_response();
    };

    let slug = path
        .strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(locale.code()))
        .unwrap_or_default();

    let ctx = RenderContext {
        locale,
        locales: &state.locales,
        links: &state.links,
        client: &state.client,
        path,
    };

    match state.renderer.render(slug, &ctx) {
        Some(body) => ([(CONTENT_LANGUAGE, locale.code())], Html(body)).into_response(),
        None => {
            tracing::debug!("Unknown page {} (locale={})", path, locale);
            let message = ApiError::page_not_found(path).localized_message(locale);
            (
                StatusCode::NOT_FOUND,
                [(CONTENT_LANGUAGE, locale.code())],
                Html(format!(
                    "<!DOCTYPE html>\n<html lang=\"{}\"><body><h1>404</h1><p>{}</p><a href=\"{}\">↩</a></body></html>\n",
                    locale,
                    message,
                    state.links.localize("/", locale)
                )),
            )
                .into_response()
        },
    }
}

pub async fn robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\nSitemap: {}/sitemap.xml\n",
        state.public_url
    );
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// Every known page in every supported locale, canonical URLs only.
pub async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut body = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for locale in state.locales.supported() {
        for page in SITE_PAGES {
            let href = state.links.localize(&format!("/{}", page), *locale);
            body.push_str(&format!("  <url><loc>{}{}</loc></url>\n", state.public_url, href));
        }
    }
    body.push_str("</urlset>\n");

    ([(CONTENT_TYPE, "application/xml")], body)
}

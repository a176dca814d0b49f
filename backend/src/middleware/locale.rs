//! Locale routing middleware
//!
//! Runs the [`EdgeRouter`] in front of every route. Canonical requests continue
//! with their locale stored in the request extensions; everything else is
//! answered with a single redirect.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{
        HeaderValue, StatusCode,
        header::{ACCEPT_LANGUAGE, LOCATION, VARY},
        request::Parts,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::models::Locale;
use crate::services::{EdgeRouter, Redirect, RouteDecision, negotiate_header};

/// Locale of the current request.
///
/// Page routes get it from their URL prefix; exempt routes (API) fall back to
/// negotiating `Accept-Language`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

/// Middleware enforcing locale-prefixed canonical URLs
pub async fn edge_router_middleware(
    State(router): State<Arc<EdgeRouter>>,
    mut req: Request,
    next: Next,
) -> Response {
    let accept_language = req.headers().get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());

    let decision = router.route(req.uri().path(), req.uri().query(), accept_language);

    match decision {
        RouteDecision::PassThrough { locale } => {
            if let Some(locale) = locale {
                req.extensions_mut().insert(ResolvedLocale(locale));
            }
            next.run(req).await
        },
        RouteDecision::Redirect(redirect) => redirect_response(redirect),
    }
}

fn redirect_response(redirect: Redirect) -> Response {
    let Ok(location) = HeaderValue::from_str(&redirect.location) else {
        tracing::warn!("Refusing redirect to invalid location: {:?}", redirect.location);
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut response = redirect.status.status_code().into_response();
    let headers = response.headers_mut();
    headers.insert(LOCATION, location);
    if redirect.vary_accept_language {
        headers.insert(VARY, HeaderValue::from_static("accept-language"));
    }
    response
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ResolvedLocale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(locale) = parts.extensions.get::<ResolvedLocale>() {
            return Ok(*locale);
        }

        let accept_language = parts.headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
        Ok(ResolvedLocale(negotiate_header(accept_language, &state.locales)))
    }
}

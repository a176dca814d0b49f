use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};

use crate::AppState;
use crate::middleware::ResolvedLocale;
use crate::models::{ClientLocaleSettings, LocaleInfoResponse, LocalizeQuery, LocalizeResponse};
use crate::utils::{ApiError, ApiResult};

/// Supported locales, the locale negotiated for this caller and the client
/// store settings
#[utoipa::path(
    get,
    path = "/api/locale",
    responses(
        (status = 200, description = "Locale configuration", body = LocaleInfoResponse)
    ),
    tag = "Locale"
)]
pub async fn get_locale_info(
    State(state): State<Arc<AppState>>,
    ResolvedLocale(negotiated): ResolvedLocale,
) -> Json<LocaleInfoResponse> {
    Json(LocaleInfoResponse {
        supported: state.locales.supported().to_vec(),
        default: state.locales.default_locale(),
        negotiated,
        client: ClientLocaleSettings::from(&state.client),
    })
}

/// Localize an internal link for the given active locale
#[utoipa::path(
    get,
    path = "/api/locale/localize",
    params(LocalizeQuery),
    responses(
        (status = 200, description = "Localized link", body = LocalizeResponse),
        (status = 400, description = "Unsupported locale"),
    ),
    tag = "Locale"
)]
pub async fn localize_link(
    State(state): State<Arc<AppState>>,
    ResolvedLocale(request_locale): ResolvedLocale,
    Query(query): Query<LocalizeQuery>,
) -> ApiResult<Json<LocalizeResponse>> {
    let locale = state.locales.find(&query.locale).ok_or_else(|| {
        tracing::debug!("Rejecting localize request for locale '{}'", query.locale);
        ApiError::unsupported_locale(query.locale.clone()).in_locale(request_locale)
    })?;

    Ok(Json(LocalizeResponse { href: state.links.localize(&query.href, locale), locale }))
}

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use rust_i18n::t;
use validator::Validate;

use crate::AppState;
use crate::middleware::ResolvedLocale;
use crate::models::{ContactAccepted, ContactSubmission};
use crate::utils::{ApiError, ApiResult};

/// Submit the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactSubmission,
    responses(
        (status = 202, description = "Submission accepted", body = ContactAccepted),
        (status = 400, description = "Validation error"),
    ),
    tag = "Contact"
)]
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ResolvedLocale(locale): ResolvedLocale,
    Json(payload): Json<ContactSubmission>,
) -> ApiResult<(StatusCode, Json<ContactAccepted>)> {
    payload.validate().map_err(|e| ApiError::from(e).in_locale(locale))?;

    state.contact.submit(locale, payload).await.map_err(|e| e.in_locale(locale))?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactAccepted {
            locale,
            message: t!("contact.accepted", locale = locale.code()).to_string(),
        }),
    ))
}

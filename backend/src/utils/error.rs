use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

use crate::models::Locale;

/// API Error with rich context and automatic error trait implementations
///
/// Responses are only built through [`ApiError::in_locale`], so every
/// message is rendered in the request's locale.
#[derive(Error, Debug)]
pub enum ApiError {
    // Resource errors 3xxx
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Page not found: {path}")]
    PageNotFound { path: String },

    // Validation errors 4xxx
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // System errors 5xxx
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Contact delivery failed: {0}")]
    ContactDeliveryFailed(String),
}

impl ApiError {
    /// Helper to create not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound(message.into())
    }

    /// Helper to create page not found error
    pub fn page_not_found(path: impl Into<String>) -> Self {
        Self::PageNotFound { path: path.into() }
    }

    /// Helper to create unsupported locale error
    pub fn unsupported_locale(code: impl Into<String>) -> Self {
        Self::UnsupportedLocale(code.into())
    }

    /// Helper to create validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Helper to create internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    pub fn error_code(&self) -> i32 {
        match self {
            // Resource errors 3xxx
            Self::ResourceNotFound(_) => 3000,
            Self::PageNotFound { .. } => 3001,

            // Validation errors 4xxx
            Self::UnsupportedLocale(_) => 4001,
            Self::ValidationError(_) => 4002,

            // System errors 5xxx
            Self::InternalError(_) => 5001,
            Self::ContactDeliveryFailed(_) => 5002,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error_code() {
            3000..=3999 => StatusCode::NOT_FOUND,
            4000..=4999 => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get localized error message for the given locale
    pub fn localized_message(&self, locale: Locale) -> String {
        let locale = locale.code();
        match self {
            Self::ResourceNotFound(name) => {
                t!("resource.not_found", locale = locale, name = name).to_string()
            },
            Self::PageNotFound { path } => {
                t!("resource.page_not_found", locale = locale, path = path).to_string()
            },
            Self::UnsupportedLocale(code) => {
                t!("validation.unsupported_locale", locale = locale, code = code).to_string()
            },
            Self::ValidationError(details) => {
                t!("validation.failed", locale = locale, details = details).to_string()
            },
            Self::InternalError(msg) => {
                t!("internal.error", locale = locale, message = msg).to_string()
            },
            Self::ContactDeliveryFailed(_) => {
                t!("contact.delivery_failed", locale = locale).to_string()
            },
        }
    }

    /// Attach the locale the error response should be rendered in
    pub fn in_locale(self, locale: Locale) -> LocalizedError {
        LocalizedError { locale, error: self }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::validation_error(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub code: i32,
    pub message: String,
}

/// An [`ApiError`] paired with the locale of the request that produced it.
#[derive(Debug)]
pub struct LocalizedError {
    pub locale: Locale,
    pub error: ApiError,
}

impl IntoResponse for LocalizedError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.error);
        }

        let response = ApiErrorResponse {
            code: self.error.error_code(),
            message: self.error.localized_message(self.locale),
        };

        (status, Json(response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, LocalizedError>;

/// Invalid startup configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Supported locale set cannot be empty")]
    EmptyLocaleSet,

    #[error("Default locale '{0}' is not in the supported set")]
    DefaultNotSupported(Locale),

    #[error("Client fallback locale '{0}' is not in the supported set")]
    FallbackNotSupported(Locale),

    #[error("Exempt prefix '{0}' must start with '/' and name at least one segment")]
    InvalidExemptPrefix(String),

    #[error("Exempt prefix '{0}' collides with a locale prefix")]
    PrefixShadowsLocale(String),

    #[error("Unknown locale code in configuration: {0}")]
    UnknownLocale(String),

    #[error("Invalid root redirect policy: {0}")]
    InvalidRootPolicy(String),

    #[error("Failed to build locale prefix pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Failure of the persistent client preference backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("Preference storage quota exceeded")]
    QuotaExceeded,

    #[error("Preference storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Locale '{0}' is not supported by this site")]
    Unsupported(Locale),
}

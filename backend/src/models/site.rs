use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::Locale;
use crate::services::{PersistPolicy, StoreSettings};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LocaleInfoResponse {
    pub supported: Vec<Locale>,
    pub default: Locale,
    /// Locale negotiated from the caller's `Accept-Language` header
    pub negotiated: Locale,
    pub client: ClientLocaleSettings,
}

/// Settings the client locale store is hydrated with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClientLocaleSettings {
    /// Used when the browser language is unsupported
    pub fallback: Locale,
    pub storage_key: String,
    pub persist_policy: PersistPolicy,
}

impl From<&StoreSettings> for ClientLocaleSettings {
    fn from(settings: &StoreSettings) -> Self {
        Self {
            fallback: settings.fallback,
            storage_key: settings.storage_key.clone(),
            persist_policy: settings.persist_policy,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocalizeQuery {
    pub href: String,
    /// Active locale code; must be one of the supported locales
    pub locale: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocalizeResponse {
    pub href: String,
    pub locale: Locale,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ContactSubmission {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactAccepted {
    pub locale: Locale,
    pub message: String,
}

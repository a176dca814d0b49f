pub mod contact;
pub mod locale;
pub mod pages;

use utoipa::OpenApi;

use crate::models::{
    ClientLocaleSettings, ContactAccepted, ContactSubmission, Locale, LocaleInfoResponse,
    LocalizeResponse,
};
use crate::services::PersistPolicy;

#[derive(OpenApi)]
#[openapi(
    paths(locale::get_locale_info, locale::localize_link, contact::submit_contact),
    components(schemas(
        Locale,
        LocaleInfoResponse,
        ClientLocaleSettings,
        PersistPolicy,
        LocalizeResponse,
        ContactSubmission,
        ContactAccepted
    )),
    tags(
        (name = "Locale", description = "Locale negotiation and link localization"),
        (name = "Contact", description = "Contact form hand-off")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

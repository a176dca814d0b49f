pub mod locale;
pub mod site;

pub use locale::{Locale, LocaleConfig, LocaleQualityEntry, ParseLocaleError, RoutePath};
pub use site::{
    ClientLocaleSettings, ContactAccepted, ContactSubmission, LocaleInfoResponse, LocalizeQuery,
    LocalizeResponse,
};

pub mod contact_sink;
pub mod edge_router;
pub mod locale_store;
pub mod negotiator;
pub mod page_renderer;

pub use contact_sink::{ContactSink, LoggingContactSink};
pub use edge_router::{
    EdgeRouter, Redirect, RedirectStatus, RootRedirectPolicy, RouteDecision, RouterConfig,
};
pub use locale_store::{
    FileStorage, LanguageSource, LocaleStore, MemoryStorage, PREFERENCE_KEY, PersistPolicy,
    PreferenceStorage, StaticLanguages, StoreSettings, SubscriptionId, SystemLanguages,
};
pub use negotiator::{negotiate, negotiate_header, parse_accept_language};
pub use page_renderer::{PageRenderer, RenderContext, SITE_PAGES, ShellRenderer, page_title};

pub mod locale;

pub use locale::{ResolvedLocale, edge_router_middleware};

pub mod error;
pub mod link;

pub use error::{
    ApiError, ApiErrorResponse, ApiResult, ConfigError, LocalizedError, StorageError, StoreError,
};
pub use link::LinkLocalizer;

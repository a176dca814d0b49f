//! Contact form delivery seam
//!
//! Email and spreadsheet delivery are external; the site only hands off a
//! validated submission together with the visitor's locale.

use async_trait::async_trait;

use crate::models::{ContactSubmission, Locale};
use crate::utils::ApiError;

#[async_trait]
pub trait ContactSink: Send + Sync {
    async fn submit(&self, locale: Locale, submission: ContactSubmission) -> Result<(), ApiError>;
}

/// Logs submissions instead of delivering them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingContactSink;

#[async_trait]
impl ContactSink for LoggingContactSink {
    async fn submit(&self, locale: Locale, submission: ContactSubmission) -> Result<(), ApiError> {
        tracing::info!(
            "Contact submission received (locale={}, name={}, {} chars)",
            locale,
            submission.name,
            submission.message.len()
        );
        Ok(())
    }
}

// Common test utilities and helpers

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header::ACCEPT_LANGUAGE},
};
use tower::ServiceExt;

use crate::config::Config;
use crate::models::{ContactSubmission, Locale};
use crate::services::{ContactSink, PreferenceStorage};
use crate::utils::{ApiError, StorageError};
use crate::{AppState, create_router};

/// Config used by HTTP tests: defaults, no static directory
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.static_config.enabled = false;
    config.server.public_url = "https://example.test".to_string();
    config
}

pub fn create_test_app(config: &Config) -> Router {
    let state = AppState::from_config(config).expect("Failed to build app state");
    create_router(Arc::new(state), config)
}

pub fn create_test_app_with_sink(config: &Config, sink: Arc<dyn ContactSink>) -> Router {
    let mut state = AppState::from_config(config).expect("Failed to build app state");
    state.contact = sink;
    create_router(Arc::new(state), config)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("Request failed")
}

pub async fn get(app: &Router, uri: &str, accept_language: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = accept_language {
        builder = builder.header(ACCEPT_LANGUAGE, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get("location").and_then(|v| v.to_str().ok())
}

/// Storage that fails every operation, like a browser in privacy mode
#[derive(Debug, Default)]
pub struct FailingStorage;

impl PreferenceStorage for FailingStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".to_string()))
    }
}

/// Contact sink that keeps every submission for inspection
#[derive(Default)]
pub struct RecordingContactSink {
    pub submissions: Mutex<Vec<(Locale, ContactSubmission)>>,
}

#[async_trait]
impl ContactSink for RecordingContactSink {
    async fn submit(&self, locale: Locale, submission: ContactSubmission) -> Result<(), ApiError> {
        self.submissions.lock().unwrap().push((locale, submission));
        Ok(())
    }
}

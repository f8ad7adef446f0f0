//! Upstream translation providers
//!
//! Providers only move bytes: they send the request and hand back the raw
//! JSON body of a successful response. Interpreting that body is the
//! orchestrator's job (see `normalize`).

pub mod libre;
pub mod mymemory;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

use super::types::ValidatedRequest;
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::{ProviderKind, ProviderSettings};
use crate::shared::types::Language;

pub use libre::LibreTranslateProvider;
pub use mymemory::MyMemoryProvider;

#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Short name used in logs.
    fn id(&self) -> &str;

    /// Raw body of a 2xx translate response.
    async fn translate(&self, request: &ValidatedRequest) -> AppResult<Value>;

    /// Raw detection candidates as `[{ language, confidence }]`.
    async fn detect(&self, text: &str) -> AppResult<Value>;

    async fn languages(&self) -> AppResult<Vec<Language>>;
}

pub fn build_http_client(settings: &ProviderSettings) -> AppResult<Client> {
    Client::builder()
        .user_agent(concat!("translator-service/", env!("CARGO_PKG_VERSION")))
        .timeout(settings.timeout())
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))
}

pub fn build_provider(settings: &ProviderSettings) -> AppResult<Arc<dyn TranslationProvider>> {
    let http = build_http_client(settings)?;
    let provider: Arc<dyn TranslationProvider> = match settings.kind {
        ProviderKind::LibreTranslate => Arc::new(LibreTranslateProvider::new(
            http,
            settings.base_url(),
            settings.api_key.clone(),
        )),
        ProviderKind::MyMemory => Arc::new(MyMemoryProvider::new(
            http,
            settings.base_url(),
            settings.api_key.clone(),
            settings.email.clone(),
        )),
    };
    tracing::info!(
        "[Provider] using {} at {}",
        provider.id(),
        settings.base_url()
    );
    Ok(provider)
}

/// Check the status and parse the body. Non-2xx and unreadable bodies both
/// count as the provider being unavailable.
pub(crate) async fn read_json(provider: &str, response: reqwest::Response) -> AppResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("[{}] API returned {}: {}", provider, status, body);
        return Err(AppError::ProviderUnavailable(format!(
            "{} API error: {}",
            provider, status
        )));
    }

    response.json::<Value>().await.map_err(|e| {
        tracing::warn!("[{}] unreadable response body: {}", provider, e);
        AppError::ProviderUnavailable(format!("{} returned a malformed body: {}", provider, e))
    })
}

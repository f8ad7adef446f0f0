//! Translation orchestration
//!
//! Takes a validated request, short-circuits pass-throughs, calls the
//! provider once under a timeout, normalizes whatever shape it answered
//! with and records the result in history.
//!
//! Pass-through translations (same concrete source and target language)
//! never reach the provider and are never recorded in history.

pub mod languages;
pub mod normalize;
pub mod provider;
pub mod types;
pub mod validation;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

use crate::features::history::HistoryStore;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{DetectedLanguage, NewTranslation, TranslationResult};
use provider::TranslationProvider;
use types::ValidatedRequest;

pub struct Translator {
    provider: Arc<dyn TranslationProvider>,
    history: Arc<HistoryStore>,
    timeout: Duration,
}

impl Translator {
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        history: Arc<HistoryStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            history,
            timeout,
        }
    }

    async fn call_provider<T, F>(&self, what: &str, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(AppError::ProviderUnavailable(format!(
                "{} {} timed out after {:?}",
                self.provider.id(),
                what,
                self.timeout
            ))),
        }
    }

    pub async fn translate(&self, request: ValidatedRequest) -> AppResult<TranslationResult> {
        let span = tracing::info_span!(
            "translate",
            request_id = %Uuid::new_v4(),
            provider = self.provider.id(),
            source = %request.source_language,
            target = %request.target_language,
        );
        self.translate_inner(request).instrument(span).await
    }

    async fn translate_inner(&self, request: ValidatedRequest) -> AppResult<TranslationResult> {
        if request.is_pass_through() {
            tracing::debug!("[Translator] pass-through, skipping provider");
            return Ok(TranslationResult {
                translated_text: request.source_text,
                detected_language: None,
            });
        }

        let body = self
            .call_provider("translate", self.provider.translate(&request))
            .await
            .inspect_err(|e| tracing::warn!("[Translator] provider call failed: {}", e))?;

        let mut result = normalize::normalize_translation(&body)
            .inspect_err(|e| tracing::warn!("[Translator] unusable provider response: {}", e))?;

        // Detection is only meaningful when the caller asked for it.
        if !request.is_auto_source() {
            result.detected_language = None;
        }

        let id = self.history.append(NewTranslation {
            source_text: request.source_text,
            translated_text: result.translated_text.clone(),
            source_language: request.source_language,
            target_language: request.target_language,
            detected_language: result.detected_language.clone(),
            user_id: request.user_id,
        });
        tracing::info!("[Translator] translation recorded as #{}", id);

        Ok(result)
    }

    /// Candidate source languages for `text`, most confident first.
    pub async fn detect(&self, text: &str) -> AppResult<Vec<DetectedLanguage>> {
        let body = self
            .call_provider("detect", self.provider.detect(text))
            .await
            .inspect_err(|e| tracing::warn!("[Translator] detection failed: {}", e))?;
        normalize::normalize_detections(&body)
    }
}

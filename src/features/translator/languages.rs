//! Language catalog
//!
//! Caches the provider's language list. A failed refresh keeps serving the
//! stale list; the provider error only surfaces while the cache is empty.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

use super::provider::TranslationProvider;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::Language;

struct CachedLanguages {
    languages: Vec<Language>,
    fetched_at: DateTime<Utc>,
}

pub struct LanguageCatalog {
    provider: Arc<dyn TranslationProvider>,
    cache: RwLock<Option<CachedLanguages>>,
    ttl: Duration,
    timeout: std::time::Duration,
}

impl LanguageCatalog {
    pub fn new(
        provider: Arc<dyn TranslationProvider>,
        ttl: std::time::Duration,
        timeout: std::time::Duration,
    ) -> Self {
        Self {
            provider,
            cache: RwLock::new(None),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::hours(24)),
            timeout,
        }
    }

    fn cached(&self, fresh_only: bool) -> Option<Vec<Language>> {
        let guard = self.cache.read().ok()?;
        let cached = guard.as_ref()?;
        if fresh_only && Utc::now() - cached.fetched_at >= self.ttl {
            return None;
        }
        Some(cached.languages.clone())
    }

    pub async fn languages(&self) -> AppResult<Vec<Language>> {
        if let Some(languages) = self.cached(true) {
            return Ok(languages);
        }

        match self.fetch().await {
            Ok(mut languages) => {
                languages.sort_by(|a, b| a.name.cmp(&b.name));
                if let Ok(mut guard) = self.cache.write() {
                    *guard = Some(CachedLanguages {
                        languages: languages.clone(),
                        fetched_at: Utc::now(),
                    });
                }
                tracing::info!("[Languages] cached {} languages", languages.len());
                Ok(languages)
            }
            Err(e) => match self.cached(false) {
                Some(stale) => {
                    tracing::warn!("[Languages] refresh failed, serving stale list: {}", e);
                    Ok(stale)
                }
                None => Err(e),
            },
        }
    }

    async fn fetch(&self) -> AppResult<Vec<Language>> {
        tokio::time::timeout(self.timeout, self.provider.languages())
            .await
            .map_err(|_| {
                AppError::ProviderUnavailable(format!(
                    "{} language list timed out after {:?}",
                    self.provider.id(),
                    self.timeout
                ))
            })?
    }
}

//! HTTP surface
//!
//! Thin axum layer over the translator and the two stores. Handlers parse,
//! validate and delegate; every failure goes through `AppError`'s
//! `IntoResponse` so status codes and bodies stay uniform.

pub mod error;
pub mod routes;

use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::features::history::HistoryStore;
use crate::features::phrases::SavedPhraseStore;
use crate::features::translator::languages::LanguageCatalog;
use crate::features::translator::provider::TranslationProvider;
use crate::features::translator::Translator;
use crate::shared::settings::{AppSettings, LimitSettings};

/// Everything a handler can reach. Stores are built here and injected,
/// never global.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
    pub history: Arc<HistoryStore>,
    pub phrases: Arc<SavedPhraseStore>,
    pub languages: Arc<LanguageCatalog>,
    pub limits: Arc<LimitSettings>,
}

impl AppState {
    pub fn new(settings: &AppSettings, provider: Arc<dyn TranslationProvider>) -> Self {
        let timeout = settings.provider.timeout();
        let history = Arc::new(HistoryStore::new(settings.limits.history_capacity));
        let translator = Arc::new(Translator::new(provider.clone(), history.clone(), timeout));
        let languages = Arc::new(LanguageCatalog::new(
            provider,
            Duration::from_secs(settings.languages.refresh_secs),
            timeout,
        ));

        Self {
            translator,
            history,
            phrases: Arc::new(SavedPhraseStore::new()),
            languages,
            limits: Arc::new(settings.limits.clone()),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/languages", get(routes::languages::languages))
        .route("/api/translate", post(routes::translate::translate))
        .route("/api/detect", post(routes::translate::detect))
        .route(
            "/api/translations/history",
            get(routes::history::history).delete(routes::history::clear),
        )
        .route("/api/translations/recent", get(routes::history::recent))
        .route(
            "/api/saved-phrases",
            get(routes::phrases::list).post(routes::phrases::add),
        )
        .route("/api/saved-phrases/:id", delete(routes::phrases::remove))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

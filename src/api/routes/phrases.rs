use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::translate::body_error;
use crate::api::AppState;
use crate::features::translator::types::SavedPhraseInput;
use crate::features::translator::validation;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::SavedPhrase;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseQuery {
    pub user_id: Option<u64>,
}

/// GET /api/saved-phrases
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<PhraseQuery>, QueryRejection>,
) -> AppResult<Json<Vec<SavedPhrase>>> {
    let Query(query) = query.map_err(|e| AppError::validation("query", e.body_text()))?;
    let phrases = match query.user_id {
        Some(user_id) => state.phrases.list_for_owner(user_id),
        None => state.phrases.list(),
    };
    Ok(Json(phrases))
}

/// POST /api/saved-phrases
pub async fn add(
    State(state): State<AppState>,
    body: Result<Json<SavedPhraseInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SavedPhrase>)> {
    let Json(input) = body.map_err(body_error)?;
    let phrase = validation::validate_saved_phrase(input)?;
    let saved = state.phrases.add(phrase);
    tracing::info!("[SavedPhrases] saved phrase #{}", saved.id);
    Ok((StatusCode::CREATED, Json(saved)))
}

/// DELETE /api/saved-phrases/:id
pub async fn remove(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = id.map_err(|e| AppError::validation("id", e.body_text()))?;
    if state.phrases.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("saved phrase {}", id)))
    }
}

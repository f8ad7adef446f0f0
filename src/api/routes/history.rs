use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::AppState;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::TranslationRecord;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub user_id: Option<u64>,
}

fn query_error(rejection: QueryRejection) -> AppError {
    AppError::validation("query", rejection.body_text())
}

fn list(state: &AppState, query: HistoryQuery, default_limit: usize) -> Vec<TranslationRecord> {
    let limit = query.limit.unwrap_or(default_limit);
    match query.user_id {
        Some(user_id) => state.history.list_for_owner(user_id, limit),
        None => state.history.list(limit),
    }
}

/// GET /api/translations/history
pub async fn history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<Vec<TranslationRecord>>> {
    let Query(query) = query.map_err(query_error)?;
    let default_limit = state.limits.history_default_limit;
    Ok(Json(list(&state, query, default_limit)))
}

/// GET /api/translations/recent
pub async fn recent(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Json<Vec<TranslationRecord>>> {
    let Query(query) = query.map_err(query_error)?;
    let default_limit = state.limits.recent_default_limit;
    Ok(Json(list(&state, query, default_limit)))
}

/// DELETE /api/translations/history
pub async fn clear(State(state): State<AppState>) -> Json<Value> {
    state.history.clear();
    Json(json!({ "success": true }))
}

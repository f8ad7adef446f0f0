use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::shared::error::AppResult;
use crate::shared::types::Language;

/// GET /api/languages
pub async fn languages(State(state): State<AppState>) -> AppResult<Json<Vec<Language>>> {
    Ok(Json(state.languages.languages().await?))
}

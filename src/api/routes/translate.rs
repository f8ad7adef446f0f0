use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::AppState;
use crate::features::translator::types::{DetectInput, TranslateInput};
use crate::features::translator::validation;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{DetectedLanguage, TranslationResult};

pub(crate) fn body_error(rejection: JsonRejection) -> AppError {
    AppError::validation("body", rejection.body_text())
}

/// POST /api/translate
pub async fn translate(
    State(state): State<AppState>,
    body: Result<Json<TranslateInput>, JsonRejection>,
) -> AppResult<Json<TranslationResult>> {
    let Json(input) = body.map_err(body_error)?;
    let request = validation::validate_translate(input, state.limits.max_text_chars)?;
    let result = state.translator.translate(request).await?;
    Ok(Json(result))
}

/// POST /api/detect
pub async fn detect(
    State(state): State<AppState>,
    body: Result<Json<DetectInput>, JsonRejection>,
) -> AppResult<Json<Vec<DetectedLanguage>>> {
    let Json(input) = body.map_err(body_error)?;
    let text = validation::validate_detect(input, state.limits.max_text_chars)?;
    Ok(Json(state.translator.detect(&text).await?))
}

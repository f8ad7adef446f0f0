use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::shared::error::{AppError, FieldError};

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ProviderUnavailable(_) | AppError::ProviderResponseInvalid(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; stable per kind, never carries internals.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Invalid request",
            AppError::ProviderUnavailable(_) => "Translation service unavailable",
            AppError::ProviderResponseInvalid(_) => "Translation service returned an invalid response",
            AppError::NotFound(_) => "Not found",
            AppError::Config(_) | AppError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(what) => tracing::debug!("[Api] not found: {}", what),
            AppError::Validation(_) => tracing::info!("[Api] rejected request: {}", self),
            AppError::ProviderUnavailable(_) | AppError::ProviderResponseInvalid(_) => {
                tracing::warn!("[Api] {}", self)
            }
            AppError::Config(_) | AppError::Internal(_) => tracing::error!("[Api] {}", self),
        }

        let status = self.status();
        let message = self.public_message();
        let errors = match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        };
        (status, Json(ErrorBody { message, errors })).into_response()
    }
}

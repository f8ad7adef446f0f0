use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// A single violated constraint on an inbound request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../client/src/types/bindings.ts")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Client input malformed; carries every violation, not just the first.
    #[error("Validation Error: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Network failure, timeout, non-2xx or unreadable body from the provider.
    #[error("Provider Unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered 2xx but without the fields we need.
    #[error("Provider Response Invalid: {0}")]
    ProviderResponseInvalid(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Internal Error: {0}")]
    Internal(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ProviderUnavailable(format!("request timed out: {}", err))
        } else {
            AppError::ProviderUnavailable(err.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sentinel source language asking the provider to detect the language.
pub const AUTO_LANGUAGE: &str = "auto";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/bindings.ts")]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Detected source language with confidence on the canonical 0-100 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../client/src/types/bindings.ts")]
pub struct DetectedLanguage {
    pub language: String,
    pub confidence: u8,
}

/// Canonical translate response, identical whichever provider served it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/bindings.ts")]
pub struct TranslationResult {
    pub translated_text: String,
    pub detected_language: Option<DetectedLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/bindings.ts")]
pub struct TranslationRecord {
    #[ts(type = "number")]
    pub id: u64,
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub detected_language: Option<DetectedLanguage>,
    #[ts(type = "number | null")]
    pub user_id: Option<u64>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// A history entry before the store assigns its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub detected_language: Option<DetectedLanguage>,
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../client/src/types/bindings.ts")]
pub struct SavedPhrase {
    #[ts(type = "number")]
    pub id: u64,
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    #[ts(type = "number | null")]
    pub user_id: Option<u64>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

/// Fields copied into a saved phrase; no link back to any history record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedPhrase {
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub user_id: Option<u64>,
}

use serde::Deserialize;
use serde_json::Value;

use crate::shared::types::AUTO_LANGUAGE;

// Fields are untyped; the validator reports wrong JSON types per field.

/// Raw translate body. Accepts both the app's field names and the
/// LibreTranslate-style short names (`q`, `source`, `target`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateInput {
    #[serde(alias = "q")]
    pub source_text: Option<Value>,
    #[serde(alias = "source")]
    pub source_language: Option<Value>,
    #[serde(alias = "target")]
    pub target_language: Option<Value>,
    pub user_id: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetectInput {
    #[serde(alias = "text", alias = "sourceText")]
    pub q: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPhraseInput {
    pub source_text: Option<Value>,
    pub translated_text: Option<Value>,
    pub source_language: Option<Value>,
    pub target_language: Option<Value>,
    pub user_id: Option<Value>,
}

/// A translate request that passed validation. Only the validator builds
/// these, so the orchestrator never sees malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub source_text: String,
    /// A language code or `"auto"`.
    pub source_language: String,
    pub target_language: String,
    pub user_id: Option<u64>,
}

impl ValidatedRequest {
    pub fn is_auto_source(&self) -> bool {
        self.source_language.eq_ignore_ascii_case(AUTO_LANGUAGE)
    }

    /// Source and target are the same concrete language.
    pub fn is_pass_through(&self) -> bool {
        !self.is_auto_source() && self.source_language.eq_ignore_ascii_case(&self.target_language)
    }
}

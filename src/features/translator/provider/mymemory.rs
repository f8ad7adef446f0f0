use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::{read_json, TranslationProvider};
use crate::features::detection;
use crate::features::translator::types::ValidatedRequest;
use crate::shared::error::AppResult;
use crate::shared::types::Language;

const ID: &str = "MyMemory";

/// MyMemory has no language list endpoint; this is the catalog we offer.
const LANGUAGE_CODES: &[&str] = &[
    "en", "zh", "es", "fr", "de", "ar", "pt", "ru", "ja", "hi", "it", "nl", "pl", "tr", "hy",
    "fa", "vi", "id", "ko", "bn", "ur", "th", "sv", "da", "fi", "hu",
];

pub struct MyMemoryProvider {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    email: Option<String>,
}

impl MyMemoryProvider {
    pub fn new(http: Client, base_url: String, api_key: Option<String>, email: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
            email,
        }
    }

    fn translate_url(&self, request: &ValidatedRequest) -> String {
        let source = if request.is_auto_source() {
            "Autodetect"
        } else {
            request.source_language.as_str()
        };
        let langpair = format!("{}|{}", source, request.target_language);

        let mut url = format!(
            "{}/get?q={}&langpair={}",
            self.base_url,
            urlencoding::encode(&request.source_text),
            urlencoding::encode(&langpair)
        );
        if let Some(email) = &self.email {
            url.push_str(&format!("&de={}", urlencoding::encode(email)));
        }
        if let Some(key) = &self.api_key {
            url.push_str(&format!("&key={}", urlencoding::encode(key)));
        }
        url
    }
}

#[async_trait]
impl TranslationProvider for MyMemoryProvider {
    fn id(&self) -> &str {
        ID
    }

    async fn translate(&self, request: &ValidatedRequest) -> AppResult<Value> {
        let response = self.http.get(self.translate_url(request)).send().await?;
        read_json(ID, response).await
    }

    async fn detect(&self, text: &str) -> AppResult<Value> {
        let candidates = detection::detect_language(text)
            .map(|guess| vec![json!({ "language": guess.language, "confidence": guess.confidence })])
            .unwrap_or_default();
        Ok(Value::Array(candidates))
    }

    async fn languages(&self) -> AppResult<Vec<Language>> {
        Ok(LANGUAGE_CODES
            .iter()
            .map(|code| Language {
                code: code.to_string(),
                name: isolang::Language::from_639_1(code)
                    .map(|lang| lang.to_name().to_string())
                    .unwrap_or_else(|| code.to_string()),
            })
            .collect())
    }
}

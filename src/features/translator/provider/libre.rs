use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{read_json, TranslationProvider};
use crate::features::translator::types::ValidatedRequest;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::Language;

const ID: &str = "LibreTranslate";

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct DetectBody<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

// `/languages` also lists `targets`, which we don't use.
#[derive(Debug, Deserialize)]
struct LanguageEntry {
    code: String,
    name: String,
}

pub struct LibreTranslateProvider {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LibreTranslateProvider {
    pub fn new(http: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    fn translate_body<'a>(&'a self, request: &'a ValidatedRequest) -> TranslateBody<'a> {
        TranslateBody {
            q: &request.source_text,
            source: &request.source_language,
            target: &request.target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        }
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslateProvider {
    fn id(&self) -> &str {
        ID
    }

    async fn translate(&self, request: &ValidatedRequest) -> AppResult<Value> {
        let response = self
            .http
            .post(format!("{}/translate", self.base_url))
            .json(&self.translate_body(request))
            .send()
            .await?;
        read_json(ID, response).await
    }

    async fn detect(&self, text: &str) -> AppResult<Value> {
        let body = DetectBody {
            q: text,
            api_key: self.api_key.as_deref(),
        };
        let response = self
            .http
            .post(format!("{}/detect", self.base_url))
            .json(&body)
            .send()
            .await?;
        read_json(ID, response).await
    }

    async fn languages(&self) -> AppResult<Vec<Language>> {
        let response = self
            .http
            .get(format!("{}/languages", self.base_url))
            .send()
            .await?;
        let body = read_json(ID, response).await?;
        let entries: Vec<LanguageEntry> = serde_json::from_value(body).map_err(|e| {
            AppError::ProviderResponseInvalid(format!("unexpected language list: {}", e))
        })?;

        Ok(entries
            .into_iter()
            .map(|e| Language {
                code: e.code,
                name: e.name,
            })
            .collect())
    }
}

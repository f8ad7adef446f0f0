use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::fs;

use crate::shared::error::{AppError, AppResult};

const SETTINGS_ENV: &str = "TRANSLATOR_SETTINGS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub server: ServerSettings,
    pub provider: ProviderSettings,
    pub limits: LimitSettings,
    pub languages: LanguageSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    LibreTranslate,
    MyMemory,
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "libretranslate" | "libre" => Ok(ProviderKind::LibreTranslate),
            "mymemory" => Ok(ProviderKind::MyMemory),
            other => Err(AppError::Config(format!("Unknown translation provider: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    /// Overrides the provider's public endpoint.
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// MyMemory grants a larger daily quota when a contact email is sent.
    pub email: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_text_chars: usize,
    pub history_capacity: usize,
    pub history_default_limit: usize,
    pub recent_default_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    pub refresh_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::LibreTranslate,
            base_url: None,
            api_key: None,
            email: None,
            timeout_secs: 10,
        }
    }
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_text_chars: 5000,
            history_capacity: 100,
            history_default_limit: 10,
            recent_default_limit: 5,
        }
    }
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            refresh_secs: 24 * 60 * 60,
        }
    }
}

impl ProviderSettings {
    pub fn base_url(&self) -> String {
        let url = match (&self.base_url, self.kind) {
            (Some(url), _) => url.as_str(),
            (None, ProviderKind::LibreTranslate) => "https://libretranslate.de",
            (None, ProviderKind::MyMemory) => "https://api.mymemory.translated.net",
        };
        url.trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppSettings {
    pub fn get_settings_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("com", "antigravity", "translator-service")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Defaults, then the settings file if present, then environment overrides.
    pub async fn load() -> AppResult<Self> {
        let mut settings = match Self::get_settings_path() {
            Some(path) if path.exists() => Self::load_from(&path).await?,
            _ => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub async fn load_from(path: &std::path::Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            AppError::Config(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse settings: {}", e)))
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_number("PORT", &port)?;
        }
        if let Some(kind) = lookup("TRANSLATION_PROVIDER") {
            self.provider.kind = kind.parse()?;
        }
        if let Some(url) = lookup("TRANSLATION_API_URL") {
            self.provider.base_url = Some(url);
        }
        if let Some(key) = lookup("TRANSLATION_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.provider.api_key = Some(key);
        }
        if let Some(email) = lookup("TRANSLATION_EMAIL").filter(|e| !e.trim().is_empty()) {
            self.provider.email = Some(email);
        }
        if let Some(secs) = lookup("PROVIDER_TIMEOUT_SECS") {
            self.provider.timeout_secs = parse_number("PROVIDER_TIMEOUT_SECS", &secs)?;
        }
        if let Some(cap) = lookup("HISTORY_CAPACITY") {
            self.limits.history_capacity = parse_number("HISTORY_CAPACITY", &cap)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.provider.timeout_secs == 0 {
            return Err(AppError::Config("provider.timeout_secs must be positive".into()));
        }
        if self.limits.history_capacity == 0 {
            return Err(AppError::Config("limits.history_capacity must be positive".into()));
        }
        if self.limits.max_text_chars == 0 {
            return Err(AppError::Config("limits.max_text_chars must be positive".into()));
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} must be a valid number, got '{}'", key, raw)))
}

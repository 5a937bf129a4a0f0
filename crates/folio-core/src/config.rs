//! Configuration models.
//!
//! `FolioConfig` is read from `config.toml`; `SecretConfig` from `secret.json`.
//! Every field has a default so a partial or missing file is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_REVIEW_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REVIEW_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_REVIEW_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub storage: StorageSettings,
    pub review: ReviewSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding `storage.json`. Falls back to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewSettings {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_REVIEW_MODEL.to_string(),
            base_url: DEFAULT_REVIEW_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REVIEW_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// tracing filter level for folio crates ("error" .. "trace").
    pub level: String,
    /// Also write a daily rolling log file into the logs directory.
    pub file: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: false,
        }
    }
}

/// Contents of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    /// Overrides `[review] model` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

//! Secret service implementation.
//!
//! Reads `secret.json`; the `GEMINI_API_KEY` environment variable takes
//! precedence over the file for the Gemini key.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use folio_core::config::{GeminiConfig, SecretConfig};
use folio_core::error::{FolioError, Result};
use folio_core::secret::SecretService;

use crate::paths::FolioPaths;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Loads secret configuration and caches it after the first read.
#[derive(Clone)]
pub struct SecretServiceImpl {
    path: PathBuf,
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretServiceImpl {
    pub fn new(paths: &FolioPaths) -> Result<Self> {
        Ok(Self::with_path(paths.secret_file()?))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_from_file(&self) -> Result<SecretConfig> {
        if !self.path.exists() {
            return Ok(SecretConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SecretConfig::default());
        }
        // Parse errors carry serde's position info only, never the content.
        serde_json::from_str(&content).map_err(|e| {
            FolioError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }

    fn load_cached(&self) -> Result<SecretConfig> {
        if let Some(cached) = self
            .secrets
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
        {
            return Ok(cached.clone());
        }

        let mut loaded = self.load_from_file()?;
        if let Some(api_key) = std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
        {
            let model_name = loaded.gemini.as_ref().and_then(|g| g.model_name.clone());
            loaded.gemini = Some(GeminiConfig {
                api_key,
                model_name,
            });
        }

        *self
            .secrets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(loaded.clone());
        Ok(loaded)
    }

    /// Returns the Gemini settings, or a config error naming where to put the key.
    pub async fn gemini(&self) -> Result<GeminiConfig> {
        let secrets = self.load_secrets().await?;
        secrets
            .gemini
            .filter(|gemini| !gemini.api_key.trim().is_empty())
            .ok_or_else(|| {
                FolioError::config(format!(
                    "Gemini API key not configured: set {} or add gemini.api_key to {}",
                    GEMINI_API_KEY_ENV,
                    self.path.display()
                ))
            })
    }
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_cached()
    }

    async fn secret_file_exists(&self) -> bool {
        self.path.exists()
    }
}

//! Loads `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use folio_core::config::FolioConfig;
use folio_core::error::{FolioError, Result};

use crate::paths::FolioPaths;

/// Reads and writes the application configuration file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `config.toml` from the resolved config directory.
    pub fn new(paths: &FolioPaths) -> Result<Self> {
        Ok(Self {
            path: paths.config_file()?,
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration. A missing or empty file yields the defaults;
    /// a file that does not parse is an error.
    pub fn load(&self) -> Result<FolioConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] {} not found, using defaults",
                self.path.display()
            );
            return Ok(FolioConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(FolioConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            FolioError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }

    pub fn save(&self, config: &FolioConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

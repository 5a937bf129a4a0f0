//! Unified path management for Folio files.
//!
//! ```text
//! ~/.config/folio/             # Config directory
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! └── logs/                    # Rolling log files (folio.log.YYYY-MM-DD)
//!
//! ~/.local/share/folio/        # Data directory
//! └── storage.json             # Storage scope (session, feedback, analyses)
//! ```
//!
//! A base path override places all of the above under one directory, which
//! is what tests and `--home` use.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "folio";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for folio_core::FolioError {
    fn from(err: PathError) -> Self {
        folio_core::FolioError::config(err.to_string())
    }
}

/// Resolves every file Folio reads or writes.
#[derive(Debug, Clone, Default)]
pub struct FolioPaths {
    base: Option<PathBuf>,
}

impl FolioPaths {
    /// Creates a resolver. With `Some(base)`, config and data both live under `base`.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g. `~/.config/folio/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g. `~/.local/share/folio/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// Keep this file readable by the owner only.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Returns the storage scope file, honouring an explicit storage directory.
    pub fn storage_file(&self, storage_dir: Option<&Path>) -> Result<PathBuf, PathError> {
        let dir = match storage_dir {
            Some(dir) => dir.to_path_buf(),
            None => self.data_dir()?,
        };
        Ok(dir.join("storage.json"))
    }
}

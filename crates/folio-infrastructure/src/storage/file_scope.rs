//! File-backed storage scope.
//!
//! The whole scope lives in one JSON object (`key -> string`), so several
//! processes pointed at the same file share it the way browser tabs share
//! local storage.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::storage::StorageScope;

type ScopeMap = BTreeMap<String, String>;

/// Storage scope persisted as a single JSON file.
///
/// Provides:
/// - **Atomicity**: every write goes to a tmp file, is fsynced, then renamed
/// - **Isolation**: writers hold an exclusive lock file for the read-modify-write
///
/// A missing, empty or unparsable file reads as an empty scope.
#[derive(Debug, Clone)]
pub struct FileStorageScope {
    path: PathBuf,
}

impl FileStorageScope {
    /// Creates a handle for the scope file at `path`. Nothing is touched on disk
    /// until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ScopeMap> {
        if !self.path.exists() {
            return Ok(ScopeMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ScopeMap::new());
        }

        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(
                    "[FileStorageScope] {} is not a valid scope file, treating as empty: {}",
                    self.path.display(),
                    e
                );
                Ok(ScopeMap::new())
            }
        }
    }

    fn save(&self, map: &ScopeMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(map)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Runs `f` against the current contents under the exclusive lock and
    /// writes the result back.
    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ScopeMap),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut map = self.load()?;
        f(&mut map);
        self.save(&map)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| FolioError::storage("Scope path has no file name"))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

impl StorageScope for FileStorageScope {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|map| {
            map.remove(key);
        })
    }
}

/// Exclusive lock on `<scope>.lock`, released when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| FolioError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file })
    }
}

//! In-process storage scope.

use std::collections::HashMap;
use std::sync::Mutex;

use folio_core::error::{FolioError, Result};
use folio_core::storage::StorageScope;

/// Storage scope backed by a `HashMap`.
///
/// With a quota set, a write that would push the total size of keys and
/// values past the limit fails with `FolioError::QuotaExceeded` and leaves the
/// previous value in place.
#[derive(Debug, Default)]
pub struct MemoryStorageScope {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorageScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the total stored bytes (keys plus values) to `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageScope for MemoryStorageScope {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.lock();

        if let Some(limit) = self.quota {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let requested = others + key.len() + value.len();
            if requested > limit {
                return Err(FolioError::QuotaExceeded {
                    key: key.to_string(),
                    requested,
                    limit,
                });
            }
        }

        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

//! Browser storage and the editor's draft auto-save.
//!
//! In WASM, [`Storage`] talks to `localStorage`. Off-wasm it keeps values in
//! memory so the draft logic can be tested natively.
//!
//! # Example
//!
//! ```
//! use wordtally::browser::storage::{DraftStore, Storage};
//!
//! let drafts = DraftStore::new(Storage::local(), "wordcounter_saved_text");
//! drafts.save("An unfinished essay").unwrap();
//! assert_eq!(drafts.restorable("").as_deref(), Some("An unfinished essay"));
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::collections::HashMap;
use thiserror::Error;

/// Key/value browser storage backed by `localStorage`.
#[derive(Debug, Default)]
pub struct Storage {
    /// In-memory fallback for non-WASM environments
    #[cfg(not(target_arch = "wasm32"))]
    memory: std::sync::Mutex<HashMap<String, String>>,
}

impl Storage {
    /// Create a localStorage instance.
    #[must_use]
    pub fn local() -> Self {
        Self::default()
    }

    /// Get a value from storage.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::backend()?.get_item(key).ok()?
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.memory.lock().ok()?.get(key).cloned()
        }
    }

    /// Set a value in storage.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::backend()
                .ok_or(StorageError::NotAvailable)?
                .set_item(key, value)
                .map_err(|_| StorageError::QuotaExceeded)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.memory
                .lock()
                .map_err(|_| StorageError::AccessDenied)?
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    /// Remove a value from storage.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            Self::backend()
                .ok_or(StorageError::NotAvailable)?
                .remove_item(key)
                .map_err(|_| StorageError::AccessDenied)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.memory
                .lock()
                .map_err(|_| StorageError::AccessDenied)?
                .remove(key);
            Ok(())
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn backend() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

/// Storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is not available (e.g., in incognito mode)
    #[error("storage not available")]
    NotAvailable,
    /// Storage quota exceeded
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// Access denied
    #[error("storage access denied")]
    AccessDenied,
}

/// The editor's saved draft, kept under a single key.
#[derive(Debug)]
pub struct DraftStore {
    storage: Storage,
    key: String,
}

impl DraftStore {
    /// Drafts stored under `key`.
    #[must_use]
    pub fn new(storage: Storage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Save `text` unless it is blank. Returns whether anything was written.
    pub fn save(&self, text: &str) -> Result<bool, StorageError> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        self.storage.set(&self.key, text)?;
        tracing::debug!(key = %self.key, chars = text.encode_utf16().count(), "draft saved");
        Ok(true)
    }

    /// The saved draft, offered only while the editor is blank.
    #[must_use]
    pub fn restorable(&self, current: &str) -> Option<String> {
        if !current.trim().is_empty() {
            return None;
        }
        self.storage.get(&self.key).filter(|saved| !saved.is_empty())
    }

    /// Forget the saved draft.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)?;
        tracing::debug!(key = %self.key, "draft cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "wordcounter_saved_text";

    #[test]
    fn test_storage_set_get_remove() {
        let storage = Storage::local();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k"), Some("v".to_string()));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn test_storage_error_messages() {
        assert_eq!(StorageError::NotAvailable.to_string(), "storage not available");
        assert_eq!(StorageError::QuotaExceeded.to_string(), "storage quota exceeded");
    }

    #[test]
    fn test_draft_blank_text_not_saved() {
        let drafts = DraftStore::new(Storage::local(), KEY);
        assert!(!drafts.save("   \n\t").unwrap());
        assert_eq!(drafts.restorable(""), None);
    }

    #[test]
    fn test_draft_saved_verbatim() {
        let drafts = DraftStore::new(Storage::local(), KEY);
        assert!(drafts.save("  keep my spacing\n").unwrap());
        assert_eq!(
            drafts.restorable("").as_deref(),
            Some("  keep my spacing\n")
        );
    }

    #[test]
    fn test_draft_blank_save_keeps_previous() {
        let drafts = DraftStore::new(Storage::local(), KEY);
        drafts.save("first draft").unwrap();
        drafts.save("").unwrap();
        assert_eq!(drafts.restorable("").as_deref(), Some("first draft"));
    }

    #[test]
    fn test_draft_not_offered_over_existing_text() {
        let drafts = DraftStore::new(Storage::local(), KEY);
        drafts.save("saved").unwrap();
        assert_eq!(drafts.restorable("typing already"), None);
        assert_eq!(drafts.restorable("  ").as_deref(), Some("saved"));
    }

    #[test]
    fn test_draft_clear() {
        let drafts = DraftStore::new(Storage::local(), KEY);
        drafts.save("saved").unwrap();
        drafts.clear().unwrap();
        assert_eq!(drafts.restorable(""), None);
        assert_eq!(drafts.key(), KEY);
    }
}

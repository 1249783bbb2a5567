//! Client-side key-value store collaborator.
//!
//! The browser-local persistence seam the cart store writes through. The
//! real implementation lives with the client shell; [`MemoryLocalStore`]
//! backs tests and single-process use.

use std::sync::Mutex;

use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors from the client-side key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalStoreError {
    /// The store could not be read or written.
    #[error("local store unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous string key-value storage scoped to one client.
#[automock]
pub trait LocalStore: Send + Sync {
    /// Reads the value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError>;

    /// Deletes the value under `key`; no-op when absent.
    fn remove(&self, key: &str) -> Result<(), LocalStoreError>;
}

/// In-memory [`LocalStore`], shareable across "tabs" in tests.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    values: Mutex<FxHashMap<String, String>>,
}

impl MemoryLocalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, FxHashMap<String, String>>, LocalStoreError> {
        self.values
            .lock()
            .map_err(|_| LocalStoreError::Unavailable("poisoned lock".to_string()))
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, LocalStoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LocalStoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), LocalStoreError> {
        self.lock()?.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_then_get_roundtrips() -> TestResult {
        let store = MemoryLocalStore::new();

        store.set("cart", "[]")?;

        assert_eq!(store.get("cart")?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn missing_key_reads_as_none() -> TestResult {
        let store = MemoryLocalStore::new();

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn remove_is_a_no_op_when_absent() -> TestResult {
        let store = MemoryLocalStore::new();

        store.remove("cart")?;

        Ok(())
    }
}

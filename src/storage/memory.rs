use super::storage::{Storage, StorageError};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-process storage backend.
///
/// Optionally enforces a byte quota over all keys and values, and can be
/// created disabled to behave like storage the host has turned off.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes once keys plus values exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Storage that fails every call with [`StorageError::Unavailable`].
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Pre-populate an entry, as if written by an earlier session.
    pub fn seeded<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            Err(StorageError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    quota,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("theme").unwrap(), None);

        storage.set_item("theme", "light").unwrap();
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("light"));

        storage.remove_item("theme").unwrap();
        assert_eq!(storage.get_item("theme").unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn removing_missing_key_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_item("token").is_ok());
    }

    #[test]
    fn quota_counts_existing_entries() {
        let storage = MemoryStorage::with_quota(16);
        storage.set_item("theme", "light").unwrap();

        let err = storage.set_item("locale", "en_US").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 16, .. }));

        // Overwriting reuses the key's own budget.
        storage.set_item("theme", "dark").unwrap();
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn disabled_storage_fails_every_call() {
        let storage = MemoryStorage::disabled();
        assert!(matches!(
            storage.get_item("token"),
            Err(StorageError::Unavailable)
        ));
        assert!(storage.set_item("token", "abc").is_err());
        assert!(storage.remove_item("token").is_err());
    }

    #[test]
    fn seeded_entries_are_readable() {
        let storage = MemoryStorage::seeded([("theme", "light")]);
        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("light"));
    }
}

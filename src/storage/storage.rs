use serde::{Deserialize, Serialize};

/// Errors raised by a [`Storage`] backend.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage quota of {quota} bytes exceeded while writing {key:?}")]
    QuotaExceeded { key: String, quota: usize },
    #[error("storage is unavailable")]
    Unavailable,
}

/// String-keyed, string-valued durable storage.
pub trait Storage: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`, not an error.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Names of the keys the session store persists under.
///
/// The names must stay stable between releases or persisted values are lost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub token: String,
    pub theme: String,
    pub locale: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "token".to_string(),
            theme: "theme".to_string(),
            locale: "locale".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_key_override_keeps_defaults() {
        let keys: StorageKeys = serde_json::from_str(r#"{ "token": "app-token" }"#).unwrap();
        assert_eq!(keys.token, "app-token");
        assert_eq!(keys.theme, "theme");
        assert_eq!(keys.locale, "locale");
    }

    #[test]
    fn quota_error_names_key() {
        let err = StorageError::QuotaExceeded {
            key: "theme".to_string(),
            quota: 8,
        };
        assert_eq!(
            err.to_string(),
            "storage quota of 8 bytes exceeded while writing \"theme\""
        );
    }
}

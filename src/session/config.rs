use crate::storage::StorageKeys;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable that enables the licensed icon set.
pub const FA_PRO_ENV: &str = "LANTERN_FA_PRO";

/// Configuration fixed when the store is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Whether the licensed icon set is enabled.
    pub fa_pro: bool,
    pub keys: StorageKeys,
}

impl StoreConfig {
    /// Read the configuration from the process environment.
    ///
    /// Only the exact value `"true"` enables the icon set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fa_pro = lookup(FA_PRO_ENV).as_deref() == Some("true");
        Self {
            fa_pro,
            keys: StorageKeys::default(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// A user role as delivered by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: i32,
    /// Packed RGBA color.
    #[serde(default)]
    pub color: u32,
    /// Permission bits granted by the role.
    #[serde(default)]
    pub allowed: u64,
    /// Permission bits revoked by the role.
    #[serde(default)]
    pub denied: u64,
    #[serde(default)]
    pub invisible: bool,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: 0,
            color: 0,
            allowed: 0,
            denied: 0,
            invisible: false,
        }
    }
}

use serde::{Deserialize, Serialize};

/// An emote enabled within a set, possibly under an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEmote {
    pub id: String,
    pub name: String,
}

/// A named collection of emotes shared by every channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmoteSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub emotes: Vec<ActiveEmote>,
}

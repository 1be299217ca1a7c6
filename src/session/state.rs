use crate::model::{EmoteSet, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The active UI theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The illustration shown on the "not found" page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotFoundMode {
    TrollDespair,
    DoctorWtf,
    PotFriend,
}

impl NotFoundMode {
    pub const ALL: [NotFoundMode; 3] = [
        NotFoundMode::TrollDespair,
        NotFoundMode::DoctorWtf,
        NotFoundMode::PotFriend,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotFoundMode::TrollDespair => "troll-despair",
            NotFoundMode::DoctorWtf => "doctor-wtf",
            NotFoundMode::PotFriend => "pot-friend",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct ParseVariantError {
    kind: &'static str,
    value: String,
}

impl FromStr for Theme {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseVariantError {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for NotFoundMode {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotFoundMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseVariantError {
                kind: "not-found mode",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NotFoundMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session and UI state held by the [`AppStore`](super::AppStore).
///
/// Only `auth_token`, `theme` and `locale` are persisted; everything else
/// resets when the session ends.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub auth_token: Option<String>,
    pub theme: Theme,
    /// Unix milliseconds of the last theme swap, `0` before the first one.
    pub last_change: i64,
    pub not_found_mode: Option<NotFoundMode>,
    pub nav_open: bool,
    /// Set while a theme swap is in flight so CSS transitions stay off.
    pub no_transitions: bool,
    pub global_emote_set: Option<Arc<EmoteSet>>,
    /// Always keyed by each role's own id.
    pub roles: HashMap<String, Role>,
    pub locale: String,
    pub fa_pro: bool,
}

use std::env;

/// Reports the user's preferred languages, most preferred first.
pub trait LanguagePreferences: Send + Sync {
    fn preferred_languages(&self) -> Vec<String>;
}

/// A fixed preference list, e.g. forwarded from a browser's `navigator.languages`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLanguages(pub Vec<String>);

impl StaticLanguages {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(languages.into_iter().map(Into::into).collect())
    }
}

impl LanguagePreferences for StaticLanguages {
    fn preferred_languages(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Preferences taken from the POSIX locale environment.
///
/// `LANGUAGE` (colon separated) wins, then `LC_ALL`, `LC_MESSAGES` and `LANG`.
/// Encoding and modifier suffixes are stripped and the `C`/`POSIX` locales
/// are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLanguages;

impl EnvLanguages {
    const VARIABLES: [&'static str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut languages = Vec::new();
        for variable in Self::VARIABLES {
            let Some(value) = lookup(variable) else {
                continue;
            };
            for entry in value.split(':') {
                if let Some(tag) = strip_posix_suffixes(entry) {
                    if !languages.contains(&tag) {
                        languages.push(tag);
                    }
                }
            }
        }
        languages
    }
}

impl LanguagePreferences for EnvLanguages {
    fn preferred_languages(&self) -> Vec<String> {
        Self::from_lookup(|name| env::var(name).ok())
    }
}

fn strip_posix_suffixes(entry: &str) -> Option<String> {
    let tag = entry
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        None
    } else {
        Some(tag.to_string())
    }
}

/// First non-blank reported language tag.
pub fn preferred_locale(preferences: &dyn LanguagePreferences) -> Option<String> {
    preferences
        .preferred_languages()
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .find(|tag| !tag.is_empty())
}

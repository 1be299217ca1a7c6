//! Locale normalization and language preferences.
//!
//! Every locale the store holds goes through [`normalize_locale`]: trim,
//! first `-` to `_`, lowercase, then a [`LocaleCorrector`] maps the result
//! onto a supported canonical locale.

mod locale;
mod preferences;

pub use locale::{normalize_locale, LocaleCorrector, SupportedLocales, DEFAULT_LOCALE};
pub use preferences::{preferred_locale, EnvLanguages, LanguagePreferences, StaticLanguages};

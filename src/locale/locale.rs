/// Locale used when nothing else is known.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Maps a prepared (trimmed, underscored, lowercased) locale onto a
/// canonical supported locale.
///
/// The result must be canonical: running it through [`normalize_locale`]
/// with the same corrector has to return it unchanged. Only the first
/// hyphen is turned into an underscore before correction, so a corrector
/// must not return values that still contain hyphens.
pub trait LocaleCorrector: Send + Sync {
    fn correct(&self, locale: &str) -> String;
}

impl<F> LocaleCorrector for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn correct(&self, locale: &str) -> String {
        self(locale)
    }
}

/// Normalize a locale string.
///
/// # Examples
///
/// ```
/// use lantern::locale::{normalize_locale, SupportedLocales};
///
/// let locales = SupportedLocales::default();
/// assert_eq!(normalize_locale("  en-US ", &locales), "en_US");
/// assert_eq!(normalize_locale("de", &locales), "de_DE");
/// ```
pub fn normalize_locale(input: &str, corrector: &dyn LocaleCorrector) -> String {
    let prepared = input.trim().replacen('-', "_", 1).to_lowercase();
    corrector.correct(&prepared)
}

/// A fixed list of canonical locales with a fallback.
///
/// Correction tries an exact case-insensitive match, then the first
/// supported locale with the same language, then the fallback. Entries
/// are stored with underscores only and the fallback is always listed,
/// so every result normalizes back to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLocales {
    locales: Vec<String>,
    fallback: String,
}

impl SupportedLocales {
    pub fn new<I, S>(locales: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let canonical = |locale: String| locale.trim().replace('-', "_");
        let fallback = canonical(fallback.into());
        let mut locales: Vec<String> = locales
            .into_iter()
            .map(|locale| canonical(locale.into()))
            .collect();
        if !locales.contains(&fallback) {
            locales.push(fallback.clone());
        }
        Self { locales, fallback }
    }
}

impl Default for SupportedLocales {
    fn default() -> Self {
        Self::new(
            [
                "en_US", "en_GB", "de_DE", "fr_FR", "es_ES", "es_MX", "it_IT", "pt_BR", "pt_PT",
                "nl_NL", "pl_PL", "ru_RU", "uk_UA", "tr_TR", "sv_SE", "fi_FI", "da_DK", "nb_NO",
                "cs_CZ", "hu_HU", "ro_RO", "ja_JP", "ko_KR", "zh_CN", "zh_TW", "ar_SA", "he_IL",
                "th_TH", "vi_VN", "id_ID",
            ],
            DEFAULT_LOCALE,
        )
    }
}

impl LocaleCorrector for SupportedLocales {
    fn correct(&self, locale: &str) -> String {
        if let Some(exact) = self
            .locales
            .iter()
            .find(|supported| supported.to_lowercase() == locale.to_lowercase())
        {
            return exact.clone();
        }

        let language = locale.split('_').next().unwrap_or_default();
        if !language.is_empty() {
            if let Some(same_language) = self.locales.iter().find(|supported| {
                supported
                    .split('_')
                    .next()
                    .is_some_and(|l| l.eq_ignore_ascii_case(language))
            }) {
                return same_language.clone();
            }
        }

        log::debug!("Unsupported locale {:?}, using {}", locale, self.fallback);
        self.fallback.clone()
    }
}

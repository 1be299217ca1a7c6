use super::clock::{Clock, SystemClock};
use super::config::StoreConfig;
use super::state::{NotFoundMode, SessionState, Theme};
use super::transition::{ThemeTransition, TransitionPhase};
use crate::frame::FrameScheduler;
use crate::locale::{
    normalize_locale, preferred_locale, EnvLanguages, LanguagePreferences, LocaleCorrector,
    SupportedLocales, DEFAULT_LOCALE,
};
use crate::model::{EmoteSet, Role};
use crate::storage::{Storage, StorageKeys};
use crate::store::{Store, Subscription};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

struct Inner {
    state: Store<SessionState>,
    storage: Arc<dyn Storage>,
    frames: Arc<dyn FrameScheduler>,
    clock: Arc<dyn Clock>,
    locales: Arc<dyn LocaleCorrector>,
    keys: StorageKeys,
    transition: Mutex<Option<ThemeTransition>>,
}

impl Inner {
    fn persist(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(value) => self.storage.set_item(key, value),
            None => self.storage.remove_item(key),
        };
        if let Err(err) = result {
            log::warn!("Failed to persist {:?}: {}", key, err);
        }
    }

    /// First frame: apply the theme unless a newer change took over.
    fn swap_theme(self: &Arc<Self>, transition: ThemeTransition) {
        let swapped = self.state.update_if(|state| {
            if !transition.advance(TransitionPhase::Scheduled, TransitionPhase::Swapped) {
                return false;
            }
            state.last_change = transition.started_at();
            state.theme = transition.theme();
            true
        });
        if !swapped {
            log::debug!("Skipping superseded swap to {}", transition.theme());
            return;
        }

        log::debug!("Swapped theme to {}", transition.theme());
        let inner = Arc::downgrade(self);
        self.frames.request_frame(Box::new(move || {
            if let Some(inner) = Weak::upgrade(&inner) {
                inner.restore_transitions(transition);
            }
        }));
    }

    /// Second frame: the new theme has painted, so transitions may resume.
    fn restore_transitions(&self, transition: ThemeTransition) {
        let restored = self.state.update_if(|state| {
            if !transition.advance(TransitionPhase::Swapped, TransitionPhase::Finished) {
                return false;
            }
            state.no_transitions = false;
            true
        });
        if !restored {
            log::debug!("Leaving transitions to a newer theme change");
        }
    }
}

/// The application's session state store.
///
/// Holds the [`SessionState`], mirrors the token, theme and locale into
/// durable [`Storage`], and publishes every change to subscribers. Clones
/// share the same state.
///
/// # Examples
///
/// ```
/// use lantern::frame::FrameQueue;
/// use lantern::locale::StaticLanguages;
/// use lantern::storage::MemoryStorage;
/// use lantern::{AppStore, Theme};
/// use std::sync::Arc;
///
/// let frames = Arc::new(FrameQueue::new());
/// let store = AppStore::builder(Arc::new(MemoryStorage::new()), frames.clone())
///     .languages(StaticLanguages::new(["de-DE"]))
///     .build();
///
/// assert_eq!(store.theme(), Theme::Dark);
/// assert_eq!(store.locale(), "de_DE");
///
/// store.set_theme(Theme::Light);
/// assert!(store.no_transitions());
///
/// frames.run_frame();
/// frames.run_frame();
/// assert_eq!(store.theme(), Theme::Light);
/// assert!(!store.no_transitions());
/// ```
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Inner>,
}

impl AppStore {
    /// Start building a store over `storage` that schedules theme swaps on
    /// `frames`.
    pub fn builder(
        storage: Arc<dyn Storage>,
        frames: Arc<dyn FrameScheduler>,
    ) -> AppStoreBuilder {
        AppStoreBuilder {
            storage,
            frames,
            clock: Arc::new(SystemClock),
            locales: Arc::new(SupportedLocales::default()),
            languages: Arc::new(EnvLanguages),
            config: StoreConfig::default(),
        }
    }

    /// A clone of the whole state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.get()
    }

    /// The bearer token, if signed in.
    pub fn auth_token(&self) -> Option<String> {
        self.inner.state.read(|s| s.auth_token.clone())
    }

    /// The applied theme. Lags `set_theme` by one frame.
    pub fn theme(&self) -> Theme {
        self.inner.state.read(|s| s.theme)
    }

    /// Epoch millis at which the applied theme was requested. `0` until the first swap.
    pub fn last_change(&self) -> i64 {
        self.inner.state.read(|s| s.last_change)
    }

    /// Which not-found page variant to show, if any.
    pub fn not_found_mode(&self) -> Option<NotFoundMode> {
        self.inner.state.read(|s| s.not_found_mode)
    }

    /// Whether the navigation panel is open.
    pub fn nav_open(&self) -> bool {
        self.inner.state.read(|s| s.nav_open)
    }

    /// Whether CSS transitions are suppressed for a theme swap.
    pub fn no_transitions(&self) -> bool {
        self.inner.state.read(|s| s.no_transitions)
    }

    /// The global emote set, once loaded.
    pub fn global_emote_set(&self) -> Option<Arc<EmoteSet>> {
        self.inner.state.read(|s| s.global_emote_set.clone())
    }

    /// A copy of the role table keyed by role id.
    pub fn roles(&self) -> HashMap<String, Role> {
        self.inner.state.read(|s| s.roles.clone())
    }

    /// Look up one role by id.
    pub fn role(&self, id: &str) -> Option<Role> {
        self.inner.state.read(|s| s.roles.get(id).cloned())
    }

    /// The normalized locale, e.g. `en_US`.
    pub fn locale(&self) -> String {
        self.inner.state.read(|s| s.locale.clone())
    }

    /// Whether licensed icons are enabled.
    pub fn fa_pro(&self) -> bool {
        self.inner.state.read(|s| s.fa_pro)
    }

    /// Store or clear the bearer token.
    ///
    /// An empty token counts as no token: the persisted entry is removed.
    pub fn set_auth_token(&self, token: Option<&str>) {
        let token = token.filter(|t| !t.is_empty());
        self.inner.persist(&self.inner.keys.token, token);
        self.inner
            .state
            .update(|s| s.auth_token = token.map(str::to_string));
    }

    /// Switch the theme over two frames.
    ///
    /// Transitions are suppressed and the new theme persisted right away.
    /// The theme itself changes on the next frame, and transitions are
    /// re-enabled on the frame after that. Calling this again before both
    /// frames have run supersedes the earlier transition.
    pub fn set_theme(&self, theme: Theme) -> ThemeTransition {
        let transition = ThemeTransition::new(theme, self.inner.clock.now_millis());

        self.inner.state.update(|state| {
            let mut current = self
                .inner
                .transition
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = current.replace(transition.clone()) {
                previous.supersede();
            }
            state.no_transitions = true;
        });
        self.inner.persist(&self.inner.keys.theme, Some(theme.as_str()));

        let inner = Arc::downgrade(&self.inner);
        let scheduled = transition.clone();
        self.inner.frames.request_frame(Box::new(move || {
            if let Some(inner) = Weak::upgrade(&inner) {
                inner.swap_theme(scheduled);
            }
        }));

        transition
    }

    /// Show a not-found variant, or `None` to clear it.
    pub fn set_not_found_mode(&self, mode: Option<NotFoundMode>) {
        self.inner.state.update(|s| s.not_found_mode = mode);
    }

    /// Open or close the navigation panel.
    pub fn set_nav_open(&self, open: bool) {
        self.inner.state.update(|s| s.nav_open = open);
    }

    /// Replace the global emote set.
    pub fn set_global_emote_set(&self, set: EmoteSet) {
        let set = Arc::new(set);
        self.inner.state.update(|s| s.global_emote_set = Some(set));
    }

    /// Replace the role table. With duplicate ids the last role wins.
    pub fn set_role_list<I>(&self, roles: I)
    where
        I: IntoIterator<Item = Role>,
    {
        let roles: HashMap<String, Role> = roles
            .into_iter()
            .map(|role| (role.id.clone(), role))
            .collect();
        self.inner.state.update(|s| s.roles = roles);
    }

    /// Normalize, apply and persist a locale. Returns the stored form.
    pub fn set_locale(&self, locale: &str) -> String {
        let locale = normalize_locale(locale, &*self.inner.locales);
        self.inner.state.update(|s| s.locale = locale.clone());
        self.inner.persist(&self.inner.keys.locale, Some(&locale));
        locale
    }

    /// Run `callback` after every state change.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&SessionState) + Send + Sync + 'static,
    {
        self.inner.state.subscribe(callback)
    }

    /// Run `callback` now and whenever the selected value changes.
    pub fn watch<U, S, F>(&self, select: S, callback: F) -> Subscription
    where
        U: PartialEq + Clone + Send + 'static,
        S: Fn(&SessionState) -> U + Send + Sync + 'static,
        F: Fn(&U) + Send + Sync + 'static,
    {
        self.inner.state.watch(select, callback)
    }
}

/// Collaborators and configuration for an [`AppStore`].
pub struct AppStoreBuilder {
    storage: Arc<dyn Storage>,
    frames: Arc<dyn FrameScheduler>,
    clock: Arc<dyn Clock>,
    locales: Arc<dyn LocaleCorrector>,
    languages: Arc<dyn LanguagePreferences>,
    config: StoreConfig,
}

impl AppStoreBuilder {
    /// Clock used to timestamp theme changes.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Like [`clock`](Self::clock), for a clock the caller keeps a handle to.
    pub fn shared_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Corrector applied after locale normalization. Defaults to
    /// [`SupportedLocales::default`].
    pub fn locale_corrector(mut self, corrector: impl LocaleCorrector + 'static) -> Self {
        self.locales = Arc::new(corrector);
        self
    }

    /// Language preferences consulted when no locale is persisted.
    pub fn languages(mut self, languages: impl LanguagePreferences + 'static) -> Self {
        self.languages = Arc::new(languages);
        self
    }

    /// Build-time flags and storage keys.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the store, restoring persisted values.
    ///
    /// Missing or unreadable entries fall back to defaults: dark theme, the
    /// preferred language, or `en_US`.
    pub fn build(self) -> AppStore {
        let StoreConfig { fa_pro, keys } = self.config;
        let storage = self.storage;
        let read = |key: &str| match storage.get_item(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(err) => {
                log::warn!("Failed to read {:?}: {}", key, err);
                None
            }
        };

        let auth_token = read(&keys.token);
        let theme = match read(&keys.theme) {
            Some(stored) => stored.parse::<Theme>().unwrap_or_else(|err| {
                log::warn!("Ignoring stored theme: {}", err);
                Theme::default()
            }),
            None => Theme::default(),
        };
        let locale_source = read(&keys.locale)
            .or_else(|| preferred_locale(&*self.languages))
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        let locale = normalize_locale(&locale_source, &*self.locales);

        log::debug!(
            "Session restored: theme={}, locale={}, token={}",
            theme,
            locale,
            if auth_token.is_some() { "set" } else { "unset" }
        );

        let state = SessionState {
            auth_token,
            theme,
            last_change: 0,
            not_found_mode: None,
            nav_open: false,
            no_transitions: false,
            global_emote_set: None,
            roles: HashMap::new(),
            locale,
            fa_pro,
        };

        AppStore {
            inner: Arc::new(Inner {
                state: Store::new(state),
                storage,
                frames: self.frames,
                clock: self.clock,
                locales: self.locales,
                keys,
                transition: Mutex::new(None),
            }),
        }
    }
}

//! The application's session state store.
//!
//! [`AppStore`] owns the [`SessionState`] for the lifetime of the app. It
//! restores the token, theme and locale from durable storage at startup,
//! writes them back on change, and sequences theme swaps across two
//! frames so CSS transitions never animate the swap itself.

mod app_store;
mod clock;
mod config;
mod state;
mod transition;

pub use app_store::{AppStore, AppStoreBuilder};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{StoreConfig, FA_PRO_ENV};
pub use state::{NotFoundMode, ParseVariantError, SessionState, Theme};
pub use transition::{ThemeTransition, TransitionPhase};

//! # Lantern
//!
//! Session state for a UI application.
//!
//! Lantern keeps a small record of session and UI state, persists the
//! user's token, theme and locale, and publishes every change to
//! subscribers.
//!
//! ## Building blocks
//!
//! - `Store<T>` - Thread-safe observable container with selective watches
//! - `Storage` - Durable key/value storage (in memory or a JSON file)
//! - `FrameScheduler` - Defers callbacks to the next paint frame
//! - Locale normalization and language preference discovery
//!
//! ## Session store
//!
//! `AppStore` ties these together:
//! - Restores persisted preferences at startup with sensible fallbacks
//! - Swaps themes over two frames with transitions suppressed
//! - Lets a newer theme change supersede one still in flight

pub mod frame;
pub mod locale;
pub mod model;
pub mod session;
pub mod storage;
pub mod store;

// Re-export main types for convenience
pub use session::{AppStore, NotFoundMode, SessionState, Theme, ThemeTransition};
pub use store::{Store, Subscription};

//! Observable state containers.
//!
//! A [`Store`] owns a value, publishes every mutation to its subscribers
//! and lets consumers bind to a projection of the state with
//! [`Store::watch`].

mod outbox;
mod store;
mod subscription;

pub use store::Store;
pub use subscription::Subscription;

//! Durable key/value storage.
//!
//! The [`Storage`] trait mirrors the browser's local storage: string keys,
//! string values, synchronous access. [`MemoryStorage`] keeps entries in
//! process and [`FileStorage`] persists them to a JSON file so they
//! survive a restart.

mod file;
mod memory;
mod storage;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use storage::{Storage, StorageError, StorageKeys};

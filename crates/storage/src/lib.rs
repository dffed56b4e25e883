//! Storage abstraction and implementations for SublimeQuest.
//!
//! This crate provides a trait-based key/value storage interface with a
//! JSON-file backend, an in-memory backend, and a typed persistence layer
//! that never fails its caller.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod keys;
pub mod persistence;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use keys::StateKey;
pub use persistence::Persistence;

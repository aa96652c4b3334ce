//! Storage abstraction and implementations for Rocket Science.
//!
//! This crate provides a key-value storage interface holding JSON blobs,
//! with a file-backed implementation and an in-memory one.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod record;

pub use trait_::{KeyValueStore, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
pub use record::{load_or_default, save_record};

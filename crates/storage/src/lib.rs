//! Storage backends for questlog.
//!
//! The [`Storage`] trait is the record-store seam: services read and write
//! typed records through it and stay ignorant of where they live. The default
//! backend keeps one JSON file per record.

mod trait_;

mod json_storage;

pub use json_storage::JsonStorage;
pub use trait_::{Result, Storage, StorageError};

//! Versioned options storage for rolod0x.
//!
//! The whole settings object (theme, display formats, and the ordered
//! section collection) lives as a single blob under one key of an opaque
//! asynchronous key/value backend. Every write is a full read-modify-write
//! of that blob: there is no field-level atomicity and no optimistic
//! concurrency, so concurrent writers race with last-write-wins semantics.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] is the backend seam; [`MemoryStore`] is the
//!   in-memory reference implementation used by tests.
//! - [`OptionsStore`] is an explicitly constructed handle (defaults,
//!   migration list, storage namespace); callers own its lifetime.
//! - The legacy single-blob schema is upgraded at load time by the
//!   migration list, and again on the read path for blobs written behind
//!   the store's back.

mod error;
mod kv;
mod migrate;
mod store;

pub use error::{StorageError, StorageResult};
pub use kv::{KeyValueStore, MemoryStore};
pub use migrate::{
    detect_version, migrate_to_sections, migrate_v1_to_v2, remove_unused, Migration,
    MigrationError, MigrationResult, SchemaVersion,
};
pub use store::{OptionsPatch, OptionsStore, OptionsStoreConfig, SectionPatch};

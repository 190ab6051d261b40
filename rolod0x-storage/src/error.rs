//! Error types for the options store.

use rolod0x_types::SectionId;
use thiserror::Error;

use crate::migrate::MigrationError;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// All errors that can occur in options-store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Referenced section id absent from the current collection.
    #[error("section with id {0} not found")]
    SectionNotFound(SectionId),

    /// Schema (de)serialization failure; also the downstream symptom of a
    /// blob left half-migrated by a failed legacy upgrade.
    #[error("options serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A read-path schema upgrade failed. Unlike the load-time migration
    /// list, these do surface to the caller.
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Opaque backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::model::ProgressError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    /// An import blob (or the in-memory state) could not be (de)serialized.
    #[error(transparent)]
    Parse(#[from] ProgressError),
    /// The persistence backend rejected a read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Progress(#[from] ProgressServiceError),
}

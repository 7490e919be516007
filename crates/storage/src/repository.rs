use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the progress blob is stored.
pub const PROGRESS_STORAGE_KEY: &str = "zoho-practice-progress";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("write rejected: {0}")]
    WriteRejected(String),
}

/// Persistence port for the progress blob.
///
/// The blob is opaque JSON text; parsing and validation belong to the caller,
/// so a corrupt value can be detected and replaced rather than failing reads.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the stored blob.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn load_progress(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the blob cannot be written.
    async fn save_progress(&self, blob: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<Option<String>>>,
    saves: Arc<AtomicUsize>,
    reject_writes: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with a stored blob.
    #[must_use]
    pub fn with_progress(blob: impl Into<String>) -> Self {
        let repo = Self::new();
        if let Ok(mut guard) = repo.progress.lock() {
            *guard = Some(blob.into());
        }
        repo
    }

    /// Current stored blob, if any.
    #[must_use]
    pub fn stored_progress(&self) -> Option<String> {
        self.progress.lock().ok().and_then(|guard| guard.clone())
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail, e.g. to mimic an exhausted quota.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_progress(&self, blob: &str) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected("storage quota exceeded".into()));
        }
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(blob.to_owned());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(InMemoryRepository::new());
        Self { progress }
    }
}

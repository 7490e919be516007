use std::sync::Arc;

use practice_core::filter::BookmarkLookup;
use practice_core::model::{
    CategoryStats, DatasetCatalog, DatasetCategory, ProgressEntry, ProgressSnapshot,
    ProgressStatus, QuestionId,
};
use storage::repository::ProgressRepository;

use crate::error::ProgressServiceError;

/// Default file name for exported progress.
pub const EXPORT_FILE_NAME: &str = "zoho-practice-progress.json";

/// Owns completion/bookmark state and keeps the persisted blob in sync.
///
/// Every mutation builds the next snapshot, writes it through the repository
/// and only then swaps it in, so a failed write leaves the visible state
/// unchanged.
pub struct ProgressService {
    repo: Arc<dyn ProgressRepository>,
    catalog: DatasetCatalog,
    snapshot: ProgressSnapshot,
}

impl ProgressService {
    /// Read persisted progress once and build the service around it.
    ///
    /// A missing blob starts from empty per-dataset maps. So does a blob that
    /// fails to parse; it is left in storage until the next write replaces it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Storage` if the repository cannot be read.
    pub async fn load(
        repo: Arc<dyn ProgressRepository>,
        catalog: DatasetCatalog,
    ) -> Result<Self, ProgressServiceError> {
        let snapshot = match repo.load_progress().await? {
            None => ProgressSnapshot::empty(),
            Some(raw) => ProgressSnapshot::from_json(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "discarding unreadable progress blob");
                ProgressSnapshot::empty()
            }),
        };
        Ok(Self {
            repo,
            catalog,
            snapshot,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    /// Recorded entry, or `{unsolved, not bookmarked}`.
    #[must_use]
    pub fn status(&self, dataset: DatasetCategory, id: &QuestionId) -> ProgressEntry {
        self.snapshot.entry(dataset, id)
    }

    #[must_use]
    pub fn is_bookmarked(&self, dataset: DatasetCategory, id: &QuestionId) -> bool {
        self.snapshot.entry(dataset, id).bookmarked
    }

    /// Record a status and return the dataset's refreshed stats.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the new state cannot be persisted.
    pub async fn set_status(
        &mut self,
        dataset: DatasetCategory,
        id: &QuestionId,
        status: ProgressStatus,
    ) -> Result<CategoryStats, ProgressServiceError> {
        let mut next = self.snapshot.clone();
        next.entry_mut(dataset, id).status = status;
        self.commit(next).await?;
        tracing::debug!(%dataset, %id, %status, "status recorded");
        Ok(self.stats(dataset))
    }

    /// Advance a question along unsolved → attempted → solved → unsolved.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the new state cannot be persisted.
    pub async fn cycle_status(
        &mut self,
        dataset: DatasetCategory,
        id: &QuestionId,
    ) -> Result<ProgressStatus, ProgressServiceError> {
        let next = self.status(dataset, id).status.next();
        self.set_status(dataset, id, next).await?;
        Ok(next)
    }

    /// Flip the bookmark flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the new state cannot be persisted.
    pub async fn toggle_bookmark(
        &mut self,
        dataset: DatasetCategory,
        id: &QuestionId,
    ) -> Result<bool, ProgressServiceError> {
        let mut next = self.snapshot.clone();
        let entry = next.entry_mut(dataset, id);
        entry.bookmarked = !entry.bookmarked;
        let bookmarked = entry.bookmarked;
        self.commit(next).await?;
        tracing::debug!(%dataset, %id, bookmarked, "bookmark toggled");
        Ok(bookmarked)
    }

    /// Solved/attempted counts of `dataset` against a caller-supplied total.
    #[must_use]
    pub fn category_stats(&self, dataset: DatasetCategory, total: u32) -> CategoryStats {
        self.snapshot.stats(dataset, total)
    }

    /// Stats using the curated total from the catalog.
    #[must_use]
    pub fn stats(&self, dataset: DatasetCategory) -> CategoryStats {
        self.category_stats(dataset, self.catalog.total(dataset))
    }

    /// Stats for every dataset in catalog order.
    #[must_use]
    pub fn overview(&self) -> Vec<(DatasetCategory, CategoryStats)> {
        self.catalog
            .iter()
            .map(|(dataset, _)| (dataset, self.stats(dataset)))
            .collect()
    }

    #[must_use]
    pub fn bookmarked_ids(&self, dataset: DatasetCategory) -> Vec<QuestionId> {
        self.snapshot.bookmarked_ids(dataset)
    }

    #[must_use]
    pub fn export_snapshot(&self) -> ProgressSnapshot {
        self.snapshot.clone()
    }

    /// Pretty-printed export, same shape as the persisted blob.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Parse` if serialization fails.
    pub fn export_json(&self) -> Result<String, ProgressServiceError> {
        Ok(self.snapshot.to_json_pretty()?)
    }

    /// Replace all progress with an imported blob. Nothing is merged.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError::Parse` for malformed input, leaving the
    /// current state untouched, or `ProgressServiceError::Storage` if the
    /// imported state cannot be persisted.
    pub async fn import_snapshot(&mut self, blob: &str) -> Result<(), ProgressServiceError> {
        let imported = ProgressSnapshot::from_json(blob)?;
        self.commit(imported).await?;
        tracing::info!("progress imported");
        Ok(())
    }

    /// Reset one dataset, or every dataset when `dataset` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the cleared state cannot be persisted.
    pub async fn clear(
        &mut self,
        dataset: Option<DatasetCategory>,
    ) -> Result<(), ProgressServiceError> {
        let next = match dataset {
            Some(dataset) => {
                let mut next = self.snapshot.clone();
                next.clear_category(dataset);
                next
            }
            None => ProgressSnapshot::empty(),
        };
        self.commit(next).await?;
        match dataset {
            Some(dataset) => tracing::info!(%dataset, "progress cleared"),
            None => tracing::info!("all progress cleared"),
        }
        Ok(())
    }

    async fn commit(&mut self, next: ProgressSnapshot) -> Result<(), ProgressServiceError> {
        let blob = next.to_json()?;
        self.repo.save_progress(&blob).await?;
        self.snapshot = next;
        Ok(())
    }
}

impl BookmarkLookup for ProgressService {
    fn is_bookmarked(&self, dataset: DatasetCategory, id: &QuestionId) -> bool {
        ProgressService::is_bookmarked(self, dataset, id)
    }
}

use std::sync::Arc;

use practice_core::model::{DatasetCatalog, DatasetCategory};
use storage::questions::{LoadError, QuestionSource};
use storage::repository::Storage;

use crate::dataset_loader::DatasetLoader;
use crate::error::AppServicesError;
use crate::global_search::GlobalSearch;
use crate::progress_service::ProgressService;
use crate::question_filter::QuestionFilter;

/// Assembles app-facing services around one storage backend and one
/// question source.
pub struct AppServices {
    catalog: DatasetCatalog,
    progress: ProgressService,
    search: GlobalSearch,
    loader: DatasetLoader,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the initial
    /// progress read fails.
    pub async fn new_sqlite(
        db_url: &str,
        questions: Arc<dyn QuestionSource>,
        catalog: DatasetCatalog,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(storage, questions, catalog).await
    }

    /// Build services over an already constructed storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the initial progress read fails.
    pub async fn new(
        storage: Storage,
        questions: Arc<dyn QuestionSource>,
        catalog: DatasetCatalog,
    ) -> Result<Self, AppServicesError> {
        let progress = ProgressService::load(Arc::clone(&storage.progress), catalog.clone()).await?;
        let search = GlobalSearch::new(Arc::clone(&questions), catalog.clone());
        let loader = DatasetLoader::new(questions);

        Ok(Self {
            catalog,
            progress,
            search,
            loader,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &DatasetCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressService {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut ProgressService {
        &mut self.progress
    }

    #[must_use]
    pub fn search(&self) -> &GlobalSearch {
        &self.search
    }

    /// Load a dataset into a fresh filter showing all of its questions.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the dataset cannot be loaded.
    pub async fn open_dataset(&self, dataset: DatasetCategory) -> Result<QuestionFilter, LoadError> {
        let mut filter = QuestionFilter::new(dataset);
        self.loader.load_into(&mut filter).await?;
        Ok(filter)
    }
}

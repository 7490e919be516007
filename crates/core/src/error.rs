use thiserror::Error;

use crate::model::{CatalogError, ProgressError, UnknownDatasetError, UnknownDifficultyError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Dataset(#[from] UnknownDatasetError),
    #[error(transparent)]
    Difficulty(#[from] UnknownDifficultyError),
}

#![forbid(unsafe_code)]

pub mod error;
pub mod filter;
pub mod model;

pub use error::Error;
pub use filter::{BookmarkLookup, FilterSpec, FilterUpdate, NoBookmarks, SortKey};
pub use model::{
    CatalogError, CategoryStats, DatasetCatalog, DatasetCategory, DatasetConfig, Difficulty,
    ProgressEntry, ProgressError, ProgressSnapshot, ProgressStatus, Question, QuestionId,
    TaggedQuestion,
};

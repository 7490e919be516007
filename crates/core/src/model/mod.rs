mod dataset;
mod ids;
mod progress;
mod question;

pub use dataset::{CatalogError, DatasetCatalog, DatasetCategory, DatasetConfig, UnknownDatasetError};
pub use ids::{ParseIdError, QuestionId};
pub use progress::{CategoryStats, ProgressEntry, ProgressError, ProgressSnapshot, ProgressStatus};
pub use question::{
    Difficulty, PracticeLinks, PracticeSite, Question, TaggedQuestion, UnknownDifficultyError,
};

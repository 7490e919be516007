#![forbid(unsafe_code)]

pub mod app_services;
pub mod dataset_loader;
pub mod error;
pub mod global_search;
pub mod progress_service;
pub mod question_filter;

pub use app_services::AppServices;
pub use dataset_loader::{DatasetLoader, LoadOutcome};
pub use error::{AppServicesError, ProgressServiceError};
pub use global_search::{
    GlobalSearch, KNOWN_DISPLAY_CATEGORIES, SearchQuery, display_categories,
    known_display_categories,
};
pub use progress_service::{EXPORT_FILE_NAME, ProgressService};
pub use question_filter::QuestionFilter;

pub use storage::questions::LoadError;

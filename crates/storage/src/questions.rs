//! Sources for the static question datasets.

use async_trait::async_trait;
use practice_core::model::{DatasetCatalog, DatasetCategory, Question};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors raised while fetching or decoding a dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("no questions available for dataset {0}")]
    UnknownDataset(DatasetCategory),

    #[error("failed to read {dataset} questions from {}: {source}", .path.display())]
    Io {
        dataset: DatasetCategory,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {dataset} questions: {source}")]
    Http {
        dataset: DatasetCategory,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetching {dataset} questions returned status {status}")]
    HttpStatus {
        dataset: DatasetCategory,
        status: reqwest::StatusCode,
    },

    #[error("invalid {dataset} question data: {source}")]
    Parse {
        dataset: DatasetCategory,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid dataset url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Loads the question list of one dataset.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch and decode every question of `dataset`, in file order.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the dataset cannot be fetched or decoded.
    async fn load_questions(&self, dataset: DatasetCategory) -> Result<Vec<Question>, LoadError>;
}

/// Decode a dataset file body.
///
/// # Errors
///
/// Returns `LoadError::Parse` if `raw` is not a JSON array of questions.
pub fn parse_questions(dataset: DatasetCategory, raw: &str) -> Result<Vec<Question>, LoadError> {
    let questions: Vec<Question> =
        serde_json::from_str(raw).map_err(|source| LoadError::Parse { dataset, source })?;

    let mut seen = HashSet::with_capacity(questions.len());
    for question in &questions {
        if !seen.insert(&question.id) {
            tracing::warn!(%dataset, id = %question.id, "duplicate question id in dataset");
        }
    }
    Ok(questions)
}

/// Reads dataset files from a directory laid out like the static site.
#[derive(Debug, Clone)]
pub struct FileQuestionSource {
    root: PathBuf,
    catalog: DatasetCatalog,
}

impl FileQuestionSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, catalog: DatasetCatalog) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    #[must_use]
    pub fn path_for(&self, dataset: DatasetCategory) -> PathBuf {
        self.root.join(self.catalog.data_file(dataset))
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    async fn load_questions(&self, dataset: DatasetCategory) -> Result<Vec<Question>, LoadError> {
        let path = self.path_for(dataset);
        tracing::debug!(%dataset, path = %path.display(), "reading question file");
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LoadError::Io {
                dataset,
                path: path.clone(),
                source,
            })?;
        parse_questions(dataset, &raw)
    }
}

/// Fetches dataset files from a static file host.
#[derive(Debug, Clone)]
pub struct HttpQuestionSource {
    client: reqwest::Client,
    base: Url,
    catalog: DatasetCatalog,
}

impl HttpQuestionSource {
    /// Create a source rooted at `base_url`; dataset paths are joined onto it.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn new(base_url: &str, catalog: DatasetCatalog) -> Result<Self, LoadError> {
        let mut base = Url::parse(base_url.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base,
            catalog,
        })
    }

    /// Absolute URL of a dataset file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidUrl` if the configured path cannot be joined.
    pub fn url_for(&self, dataset: DatasetCategory) -> Result<Url, LoadError> {
        Ok(self.base.join(self.catalog.data_file(dataset))?)
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn load_questions(&self, dataset: DatasetCategory) -> Result<Vec<Question>, LoadError> {
        let url = self.url_for(dataset)?;
        tracing::debug!(%dataset, %url, "fetching question file");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Http { dataset, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus { dataset, status });
        }
        let raw = response
            .text()
            .await
            .map_err(|source| LoadError::Http { dataset, source })?;
        parse_questions(dataset, &raw)
    }
}

/// Fixed datasets held in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    datasets: HashMap<DatasetCategory, Vec<Question>>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dataset(mut self, dataset: DatasetCategory, questions: Vec<Question>) -> Self {
        self.datasets.insert(dataset, questions);
        self
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn load_questions(&self, dataset: DatasetCategory) -> Result<Vec<Question>, LoadError> {
        self.datasets
            .get(&dataset)
            .cloned()
            .ok_or(LoadError::UnknownDataset(dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_QUESTIONS: &str = r#"[
        {"id": "c1", "title": "Swap", "difficulty": "Easy", "category": "Pointers"},
        {"id": "c2", "title": "Strlen", "difficulty": "Medium", "category": "Strings"}
    ]"#;

    #[test]
    fn parse_questions_keeps_file_order() {
        let questions = parse_questions(DatasetCategory::CProgramming, TWO_QUESTIONS).unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
    }

    #[test]
    fn parse_questions_rejects_non_array() {
        let err = parse_questions(DatasetCategory::Lld, r#"{"id": "x"}"#).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                dataset: DatasetCategory::Lld,
                ..
            }
        ));
    }

    #[test]
    fn http_source_joins_dataset_paths() {
        let source =
            HttpQuestionSource::new("https://example.org/practice", DatasetCatalog::default())
                .unwrap();
        let url = source.url_for(DatasetCategory::ZohoDsa).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/practice/data/dsa-questions.json"
        );
    }

    #[test]
    fn http_source_rejects_relative_base() {
        let err = HttpQuestionSource::new("not a url", DatasetCatalog::default()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn in_memory_source_reports_missing_dataset() {
        let source = InMemoryQuestionSource::new();
        let err = source
            .load_questions(DatasetCategory::ZohoDocs)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnknownDataset(DatasetCategory::ZohoDocs)
        ));
    }
}

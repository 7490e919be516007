use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use practice_core::model::{DatasetCategory, Question};
use storage::questions::{LoadError, QuestionSource};

use crate::question_filter::QuestionFilter;

/// Result of a sequenced load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This was the most recent request; its data should be shown.
    Fresh(Vec<Question>),
    /// A newer request was issued while this one was in flight.
    Stale,
}

/// Loads datasets so that only the most recently issued request wins.
///
/// Completions from superseded requests are reported as `LoadOutcome::Stale`,
/// whether they succeeded or failed.
pub struct DatasetLoader {
    source: Arc<dyn QuestionSource>,
    latest: AtomicU64,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            latest: AtomicU64::new(0),
        }
    }

    /// Load `dataset`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if this request is still the latest and the
    /// dataset failed to load.
    pub async fn load(&self, dataset: DatasetCategory) -> Result<LoadOutcome, LoadError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.source.load_questions(dataset).await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::warn!(%dataset, ticket, "ignoring superseded dataset load");
            return Ok(LoadOutcome::Stale);
        }
        let questions = result?;
        tracing::debug!(%dataset, count = questions.len(), "dataset loaded");
        Ok(LoadOutcome::Fresh(questions))
    }

    /// Load the filter's dataset and hand fresh results to it.
    ///
    /// Returns `true` if the filter received new questions.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the load failed; the filter is left unchanged.
    pub async fn load_into(&self, filter: &mut QuestionFilter) -> Result<bool, LoadError> {
        match self.load(filter.dataset()).await? {
            LoadOutcome::Fresh(questions) => {
                filter.set_questions(questions);
                Ok(true)
            }
            LoadOutcome::Stale => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use practice_core::model::{Difficulty, PracticeLinks, QuestionId};
    use storage::questions::InMemoryQuestionSource;
    use tokio::sync::Notify;

    fn question(id: &str) -> Question {
        Question {
            id: QuestionId::new(id),
            title: format!("Question {id}"),
            description: String::new(),
            difficulty: Difficulty::Medium,
            category: "Arrays".to_owned(),
            tags: Vec::new(),
            companies: Vec::new(),
            hints: Vec::new(),
            time_complexity: String::new(),
            space_complexity: String::new(),
            practice_links: PracticeLinks::default(),
        }
    }

    /// `ZohoDsa` loads block until an `Lld` load has completed.
    struct GatedSource {
        inner: InMemoryQuestionSource,
        gate: Notify,
    }

    #[async_trait]
    impl QuestionSource for GatedSource {
        async fn load_questions(
            &self,
            dataset: DatasetCategory,
        ) -> Result<Vec<Question>, LoadError> {
            match dataset {
                DatasetCategory::ZohoDsa => self.gate.notified().await,
                DatasetCategory::Lld => self.gate.notify_one(),
                _ => {}
            }
            self.inner.load_questions(dataset).await
        }
    }

    #[tokio::test]
    async fn single_load_is_fresh() {
        let source = InMemoryQuestionSource::new()
            .with_dataset(DatasetCategory::Lld, vec![question("lld-1")]);
        let loader = DatasetLoader::new(Arc::new(source));

        let outcome = loader.load(DatasetCategory::Lld).await.unwrap();
        assert_eq!(outcome, LoadOutcome::Fresh(vec![question("lld-1")]));
    }

    #[tokio::test]
    async fn superseded_load_is_reported_stale() {
        let source = GatedSource {
            inner: InMemoryQuestionSource::new()
                .with_dataset(DatasetCategory::ZohoDsa, vec![question("dsa-1")])
                .with_dataset(DatasetCategory::Lld, vec![question("lld-1")]),
            gate: Notify::new(),
        };
        let loader = DatasetLoader::new(Arc::new(source));

        let (older, newer) = tokio::join!(
            loader.load(DatasetCategory::ZohoDsa),
            loader.load(DatasetCategory::Lld)
        );

        assert_eq!(older.unwrap(), LoadOutcome::Stale);
        assert_eq!(newer.unwrap(), LoadOutcome::Fresh(vec![question("lld-1")]));
    }

    #[tokio::test]
    async fn load_into_replaces_filter_questions() {
        let source = InMemoryQuestionSource::new().with_dataset(
            DatasetCategory::ZohoDocs,
            vec![question("doc-1"), question("doc-2")],
        );
        let loader = DatasetLoader::new(Arc::new(source));
        let mut filter = QuestionFilter::new(DatasetCategory::ZohoDocs);

        assert!(loader.load_into(&mut filter).await.unwrap());
        assert_eq!(filter.filtered().len(), 2);
    }

    #[tokio::test]
    async fn failed_load_leaves_filter_unchanged() {
        let loader = DatasetLoader::new(Arc::new(InMemoryQuestionSource::new()));
        let mut filter = QuestionFilter::new(DatasetCategory::ZohoDocs);
        filter.set_questions(vec![question("kept")]);

        let err = loader.load_into(&mut filter).await.unwrap_err();

        assert!(matches!(err, LoadError::UnknownDataset(DatasetCategory::ZohoDocs)));
        assert_eq!(filter.questions().len(), 1);
    }
}

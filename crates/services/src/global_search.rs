use std::sync::Arc;

use futures::future::try_join_all;
use practice_core::filter::{BookmarkLookup, FilterSpec, NoBookmarks};
use practice_core::model::{DatasetCatalog, Difficulty, TaggedQuestion};
use storage::questions::{LoadError, QuestionSource};

/// A cross-dataset query: free text plus optional difficulty and display category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|c| !c.trim().is_empty());
        self
    }

    /// No term, difficulty or category given.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
            && self.difficulty.is_none()
            && self.category.as_deref().is_none_or(|c| c.trim().is_empty())
    }

    fn to_spec(&self, bookmarked: bool) -> FilterSpec {
        FilterSpec {
            search: self.term.clone(),
            difficulty: self.difficulty,
            category: self.category.clone(),
            bookmarked,
        }
    }
}

/// Display categories offered by the search page's category selector,
/// whether or not any loaded question currently uses them.
pub const KNOWN_DISPLAY_CATEGORIES: [&str; 23] = [
    "Arrays",
    "Strings",
    "Linked Lists",
    "Stacks & Queues",
    "Trees",
    "Graphs",
    "Dynamic Programming",
    "Mathematical Problems",
    "Greedy Algorithms",
    "Backtracking",
    "Arrays & Strings",
    "Functions",
    "Pointers",
    "Structures & Unions",
    "File Handling",
    "Advanced Topics",
    "Basic Concepts",
    "Control Structures",
    "System Design",
    "Game Design",
    "Matrix",
    "Patterns",
    "Design",
];

/// The fixed selector list, sorted.
#[must_use]
pub fn known_display_categories() -> Vec<&'static str> {
    let mut categories = KNOWN_DISPLAY_CATEGORIES.to_vec();
    categories.sort_unstable();
    categories
}

/// Answers queries against every dataset at once.
pub struct GlobalSearch {
    source: Arc<dyn QuestionSource>,
    catalog: DatasetCatalog,
}

impl GlobalSearch {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, catalog: DatasetCatalog) -> Self {
        Self { source, catalog }
    }

    /// Load every dataset and tag each question with where it came from.
    ///
    /// Datasets are fetched concurrently; the result keeps catalog order,
    /// then file order within each dataset.
    ///
    /// # Errors
    ///
    /// Returns the first `LoadError`; no partial result is produced.
    pub async fn load_all(&self) -> Result<Vec<TaggedQuestion>, LoadError> {
        let loads = self.catalog.iter().map(|(dataset, config)| async move {
            let questions = self.source.load_questions(dataset).await?;
            Ok::<_, LoadError>(questions.into_iter().map(move |question| TaggedQuestion {
                question,
                source: dataset,
                source_name: config.label().to_owned(),
            }))
        });
        let merged: Vec<TaggedQuestion> = try_join_all(loads).await?.into_iter().flatten().collect();
        tracing::debug!(count = merged.len(), "loaded all datasets for global search");
        Ok(merged)
    }

    /// Run `query` over all datasets. A blank query yields nothing without
    /// loading anything.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if any dataset fails to load.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<TaggedQuestion>, LoadError> {
        if query.is_blank() {
            return Ok(Vec::new());
        }
        let all = self.load_all().await?;
        Ok(filter_tagged(all, &query.to_spec(false), &NoBookmarks))
    }

    /// Like `search`, but keeps only questions bookmarked in their own
    /// source dataset. A blank query lists every bookmarked question.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if any dataset fails to load.
    pub async fn search_bookmarked(
        &self,
        query: &SearchQuery,
        bookmarks: &(dyn BookmarkLookup + Sync),
    ) -> Result<Vec<TaggedQuestion>, LoadError> {
        let all = self.load_all().await?;
        Ok(filter_tagged(all, &query.to_spec(true), bookmarks))
    }
}

/// Apply `spec` to tagged rows, resolving bookmarks per row's source dataset.
#[must_use]
pub fn filter_tagged(
    questions: Vec<TaggedQuestion>,
    spec: &FilterSpec,
    bookmarks: &dyn BookmarkLookup,
) -> Vec<TaggedQuestion> {
    questions
        .into_iter()
        .filter(|row| spec.matches(&row.question, row.source, bookmarks))
        .collect()
}

/// Distinct display categories across tagged rows, sorted.
#[must_use]
pub fn display_categories(questions: &[TaggedQuestion]) -> Vec<&str> {
    let mut categories: Vec<&str> = questions
        .iter()
        .map(|row| row.question.category.as_str())
        .filter(|category| !category.is_empty())
        .collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use practice_core::model::{DatasetCategory, PracticeLinks, ProgressSnapshot, Question, QuestionId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::questions::InMemoryQuestionSource;

    fn question(id: &str, title: &str, difficulty: Difficulty, category: &str) -> Question {
        Question {
            id: QuestionId::new(id),
            title: title.to_owned(),
            description: String::new(),
            difficulty,
            category: category.to_owned(),
            tags: Vec::new(),
            companies: vec!["Zoho".to_owned()],
            hints: Vec::new(),
            time_complexity: String::new(),
            space_complexity: String::new(),
            practice_links: PracticeLinks::default(),
        }
    }

    fn full_source() -> InMemoryQuestionSource {
        InMemoryQuestionSource::new()
            .with_dataset(
                DatasetCategory::CProgramming,
                vec![
                    question("c1", "Swap with pointers", Difficulty::Easy, "Pointers"),
                    question("c2", "Reverse a string", Difficulty::Easy, "Strings"),
                ],
            )
            .with_dataset(
                DatasetCategory::ZohoDsa,
                vec![question("d1", "Reverse linked list", Difficulty::Medium, "Linked Lists")],
            )
            .with_dataset(
                DatasetCategory::Lld,
                vec![question("l1", "Parking lot", Difficulty::Hard, "System Design")],
            )
            .with_dataset(DatasetCategory::ZohoDocs, Vec::new())
            .with_dataset(
                DatasetCategory::LogicalCoding,
                vec![question("g1", "Reverse digits", Difficulty::Easy, "Mathematical Problems")],
            )
    }

    fn search_over(source: InMemoryQuestionSource) -> GlobalSearch {
        GlobalSearch::new(Arc::new(source), DatasetCatalog::default())
    }

    #[tokio::test]
    async fn tags_rows_in_catalog_then_file_order() {
        let search = search_over(full_source());
        let rows = search.search(&SearchQuery::new("reverse")).await.unwrap();

        let tagged: Vec<_> = rows
            .iter()
            .map(|row| (row.question.id.as_str(), row.source, row.source_name.as_str()))
            .collect();
        assert_eq!(
            tagged,
            vec![
                ("c2", DatasetCategory::CProgramming, "C Programming"),
                ("d1", DatasetCategory::ZohoDsa, "Zoho DSA"),
                ("g1", DatasetCategory::LogicalCoding, "Logical Coding"),
            ]
        );
    }

    #[tokio::test]
    async fn difficulty_and_category_narrow_results() {
        let search = search_over(full_source());
        let query = SearchQuery::new("")
            .with_difficulty(Some(Difficulty::Easy))
            .with_category(Some("Strings".into()));
        let rows = search.search(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].question.id, QuestionId::new("c2"));
    }

    #[tokio::test]
    async fn one_failed_dataset_fails_the_query() {
        let source = InMemoryQuestionSource::new().with_dataset(
            DatasetCategory::CProgramming,
            vec![question("c1", "Swap", Difficulty::Easy, "Pointers")],
        );
        let err = search_over(source)
            .search(&SearchQuery::new("swap"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::UnknownDataset(_)));
    }

    struct CountingSource {
        inner: InMemoryQuestionSource,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuestionSource for CountingSource {
        async fn load_questions(
            &self,
            dataset: DatasetCategory,
        ) -> Result<Vec<Question>, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.load_questions(dataset).await
        }
    }

    #[tokio::test]
    async fn blank_query_loads_nothing() {
        let source = Arc::new(CountingSource {
            inner: full_source(),
            calls: AtomicUsize::new(0),
        });
        let search = GlobalSearch::new(source.clone(), DatasetCatalog::default());

        let rows = search.search(&SearchQuery::new("   ")).await.unwrap();

        assert!(rows.is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bookmarked_search_checks_each_row_source() {
        let mut progress = ProgressSnapshot::empty();
        progress
            .entry_mut(DatasetCategory::Lld, &QuestionId::new("l1"))
            .bookmarked = true;
        // Same id bookmarked under another dataset must not leak across.
        progress
            .entry_mut(DatasetCategory::ZohoDocs, &QuestionId::new("c1"))
            .bookmarked = true;

        let search = search_over(full_source());
        let rows = search
            .search_bookmarked(&SearchQuery::default(), &progress)
            .await
            .unwrap();

        let ids: Vec<_> = rows.iter().map(|row| row.question.id.as_str()).collect();
        assert_eq!(ids, vec!["l1"]);
    }

    #[tokio::test]
    async fn blank_category_field_keeps_query_blank() {
        let source = Arc::new(CountingSource {
            inner: full_source(),
            calls: AtomicUsize::new(0),
        });
        let search = GlobalSearch::new(source.clone(), DatasetCatalog::default());
        let query = SearchQuery {
            category: Some(String::new()),
            ..SearchQuery::default()
        };

        assert!(query.is_blank());
        assert!(search.search(&query).await.unwrap().is_empty());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);

        let query = SearchQuery {
            term: "reverse".into(),
            category: Some(String::new()),
            ..SearchQuery::default()
        };
        assert_eq!(search.search(&query).await.unwrap().len(), 3);
    }

    #[test]
    fn known_categories_are_sorted_and_distinct() {
        let known = known_display_categories();
        assert_eq!(known.len(), KNOWN_DISPLAY_CATEGORIES.len());
        assert!(known.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(known.first(), Some(&"Advanced Topics"));
        assert!(known.contains(&"Stacks & Queues"));
    }

    #[tokio::test]
    async fn display_categories_are_sorted_and_unique() {
        let search = search_over(full_source());
        let all = search.load_all().await.unwrap();
        assert_eq!(
            display_categories(&all),
            vec![
                "Linked Lists",
                "Mathematical Problems",
                "Pointers",
                "Strings",
                "System Design"
            ]
        );
    }
}

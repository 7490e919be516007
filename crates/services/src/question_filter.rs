use practice_core::filter::{BookmarkLookup, FilterSpec, FilterUpdate, NoBookmarks, SortKey};
use practice_core::model::{DatasetCategory, Question, QuestionId};

/// Filtered view over one dataset's questions.
///
/// The base list is never modified by filtering; each filter change rescans
/// it from the start, so the order in which axes are set does not matter.
#[derive(Debug, Clone)]
pub struct QuestionFilter {
    dataset: DatasetCategory,
    questions: Vec<Question>,
    filtered: Vec<Question>,
    spec: FilterSpec,
}

impl QuestionFilter {
    /// Empty filter for the questions of `dataset`. Bookmark filtering looks
    /// up progress under this dataset.
    #[must_use]
    pub fn new(dataset: DatasetCategory) -> Self {
        Self {
            dataset,
            questions: Vec::new(),
            filtered: Vec::new(),
            spec: FilterSpec::default(),
        }
    }

    #[must_use]
    pub fn dataset(&self) -> DatasetCategory {
        self.dataset
    }

    /// Replace the base list and show all of it.
    ///
    /// The current filter spec is kept but not re-applied; call
    /// `apply_filters` once loading is done.
    pub fn set_questions(&mut self, questions: Vec<Question>) {
        self.filtered.clone_from(&questions);
        self.questions = questions;
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn filtered(&self) -> &[Question] {
        &self.filtered
    }

    #[must_use]
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    #[must_use]
    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Distinct display categories of the base list, in first-seen order.
    #[must_use]
    pub fn display_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for question in &self.questions {
            let category = question.category.as_str();
            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Set one axis and recompute the view from the base list.
    pub fn update_filter(
        &mut self,
        update: FilterUpdate,
        bookmarks: &dyn BookmarkLookup,
    ) -> &[Question] {
        self.spec.apply(update);
        self.apply_filters(bookmarks)
    }

    /// Recompute the view with the current spec.
    pub fn apply_filters(&mut self, bookmarks: &dyn BookmarkLookup) -> &[Question] {
        let dataset = self.dataset;
        let spec = &self.spec;
        self.filtered = self
            .questions
            .iter()
            .filter(|q| spec.matches(q, dataset, bookmarks))
            .cloned()
            .collect();
        &self.filtered
    }

    /// Clear every axis and show the full list again.
    pub fn reset_filters(&mut self) -> &[Question] {
        self.spec = FilterSpec::default();
        self.apply_filters(&NoBookmarks)
    }

    /// Reorder the current view. `SortKey::Original` leaves it as is.
    pub fn sort(&mut self, key: SortKey) -> &[Question] {
        key.sort(&mut self.filtered);
        &self.filtered
    }
}

//! Question matching and ordering shared by per-dataset lists and global search.

use std::cmp::Ordering;

use crate::model::{DatasetCategory, Difficulty, ProgressSnapshot, Question, QuestionId};

/// Read access to bookmark state, keyed by dataset.
pub trait BookmarkLookup {
    fn is_bookmarked(&self, dataset: DatasetCategory, id: &QuestionId) -> bool;
}

impl BookmarkLookup for ProgressSnapshot {
    fn is_bookmarked(&self, dataset: DatasetCategory, id: &QuestionId) -> bool {
        self.entry(dataset, id).bookmarked
    }
}

/// Lookup for contexts without progress data: nothing is bookmarked.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBookmarks;

impl BookmarkLookup for NoBookmarks {
    fn is_bookmarked(&self, _dataset: DatasetCategory, _id: &QuestionId) -> bool {
        false
    }
}

/// Active filter axes. Empty/`None`/`false` leaves an axis unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub search: String,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub bookmarked: bool,
}

/// A change to exactly one filter axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Search(String),
    Difficulty(Option<Difficulty>),
    Category(Option<String>),
    Bookmarked(bool),
}

impl FilterSpec {
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Search(term) => self.search = term,
            FilterUpdate::Difficulty(difficulty) => self.difficulty = difficulty,
            FilterUpdate::Category(category) => {
                self.category = category.filter(|c| !c.trim().is_empty());
            }
            FilterUpdate::Bookmarked(bookmarked) => self.bookmarked = bookmarked,
        }
    }

    /// True when no axis constrains the result.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty()
            && self.difficulty.is_none()
            && self.category.as_deref().is_none_or(|c| c.trim().is_empty())
            && !self.bookmarked
    }

    /// Evaluate every active axis against `question`, which belongs to `dataset`.
    #[must_use]
    pub fn matches(
        &self,
        question: &Question,
        dataset: DatasetCategory,
        bookmarks: &dyn BookmarkLookup,
    ) -> bool {
        let needle = self.search.trim();
        if !needle.is_empty() && !question.contains_term(&needle.to_lowercase()) {
            return false;
        }
        if self
            .difficulty
            .is_some_and(|difficulty| question.difficulty != difficulty)
        {
            return false;
        }
        if self
            .category
            .as_deref()
            .filter(|category| !category.trim().is_empty())
            .is_some_and(|category| question.category != category)
        {
            return false;
        }
        if self.bookmarked && !bookmarks.is_bookmarked(dataset, &question.id) {
            return false;
        }
        true
    }
}

/// Ordering applied to a filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep dataset order.
    #[default]
    Original,
    Difficulty,
    Title,
    Category,
}

impl SortKey {
    /// Map a user-facing key to a `SortKey`. Unrecognized keys keep the
    /// original order.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "difficulty" => SortKey::Difficulty,
            "title" => SortKey::Title,
            "category" => SortKey::Category,
            _ => SortKey::Original,
        }
    }

    #[must_use]
    pub fn compare(self, a: &Question, b: &Question) -> Ordering {
        match self {
            SortKey::Original => Ordering::Equal,
            SortKey::Difficulty => a.difficulty.rank().cmp(&b.difficulty.rank()),
            SortKey::Title => collate(&a.title, &b.title),
            SortKey::Category => a.category.cmp(&b.category),
        }
    }

    pub fn sort(self, questions: &mut [Question]) {
        if self == SortKey::Original {
            return;
        }
        questions.sort_by(|a, b| self.compare(a, b));
    }
}

// Case-folded first so "apple" sorts next to "Apple", raw text breaks ties.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::dataset::DatasetCategory;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("invalid progress status: {0}")]
    InvalidStatus(String),

    #[error("malformed progress snapshot: {0}")]
    Parse(String),

    #[error("failed to serialize progress snapshot: {0}")]
    Serialize(String),
}

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Completion state of a single question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    #[default]
    Unsolved,
    Attempted,
    Solved,
}

impl ProgressStatus {
    /// Next state when the user taps the status button:
    /// unsolved → attempted → solved → unsolved.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            ProgressStatus::Unsolved => ProgressStatus::Attempted,
            ProgressStatus::Attempted => ProgressStatus::Solved,
            ProgressStatus::Solved => ProgressStatus::Unsolved,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProgressStatus::Unsolved => "unsolved",
            ProgressStatus::Attempted => "attempted",
            ProgressStatus::Solved => "solved",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "unsolved" => Ok(ProgressStatus::Unsolved),
            "attempted" => Ok(ProgressStatus::Attempted),
            "solved" => Ok(ProgressStatus::Solved),
            other => Err(ProgressError::InvalidStatus(other.to_owned())),
        }
    }
}

//
// ─── ENTRY ─────────────────────────────────────────────────────────────────────
//

/// Recorded progress for one `(dataset, question)` pair.
///
/// A missing entry and `ProgressEntry::default()` mean the same thing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressEntry {
    pub status: ProgressStatus,
    pub bookmarked: bool,
}

//
// ─── STATS ─────────────────────────────────────────────────────────────────────
//

/// Per-dataset progress counts.
///
/// `total` is the curated question count, supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub solved: u32,
    pub attempted: u32,
    pub total: u32,
}

impl CategoryStats {
    /// Share of solved questions, in percent. Zero when `total` is zero.
    #[must_use]
    pub fn completion_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.solved) / f64::from(self.total) * 100.0
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

type DatasetProgress = BTreeMap<QuestionId, ProgressEntry>;

/// Full progress state: dataset → question id → entry.
///
/// Serializes to the same JSON object that is persisted and exported:
/// `{"lld": {"lld-1": {"status": "solved", "bookmarked": true}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressSnapshot(BTreeMap<DatasetCategory, DatasetProgress>);

impl ProgressSnapshot {
    /// A snapshot with an empty progress map for every dataset.
    #[must_use]
    pub fn empty() -> Self {
        Self(
            DatasetCategory::ALL
                .into_iter()
                .map(|cat| (cat, DatasetProgress::new()))
                .collect(),
        )
    }

    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Parse` when the text is not a JSON object of
    /// known datasets mapping question ids to entries.
    pub fn from_json(raw: &str) -> Result<Self, ProgressError> {
        serde_json::from_str(raw).map_err(|err| ProgressError::Parse(err.to_string()))
    }

    /// Compact JSON, as persisted.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Serialize` if serialization fails.
    pub fn to_json(&self) -> Result<String, ProgressError> {
        serde_json::to_string(self).map_err(|err| ProgressError::Serialize(err.to_string()))
    }

    /// Pretty-printed JSON, as exported.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Serialize` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ProgressError> {
        serde_json::to_string_pretty(self).map_err(|err| ProgressError::Serialize(err.to_string()))
    }

    /// Stored entry, or the default when nothing was recorded.
    #[must_use]
    pub fn entry(&self, category: DatasetCategory, id: &QuestionId) -> ProgressEntry {
        self.0
            .get(&category)
            .and_then(|questions| questions.get(id))
            .copied()
            .unwrap_or_default()
    }

    /// Mutable entry, created with defaults on first touch.
    pub fn entry_mut(&mut self, category: DatasetCategory, id: &QuestionId) -> &mut ProgressEntry {
        self.0
            .entry(category)
            .or_default()
            .entry(id.clone())
            .or_default()
    }

    /// Count solved/attempted entries of a dataset against a known total.
    #[must_use]
    pub fn stats(&self, category: DatasetCategory, total: u32) -> CategoryStats {
        let mut stats = CategoryStats {
            total,
            ..CategoryStats::default()
        };
        for entry in self.0.get(&category).into_iter().flat_map(BTreeMap::values) {
            match entry.status {
                ProgressStatus::Solved => stats.solved += 1,
                ProgressStatus::Attempted => stats.attempted += 1,
                ProgressStatus::Unsolved => {}
            }
        }
        stats
    }

    /// Ids bookmarked in a dataset, in id order.
    #[must_use]
    pub fn bookmarked_ids(&self, category: DatasetCategory) -> Vec<QuestionId> {
        self.0
            .get(&category)
            .into_iter()
            .flat_map(BTreeMap::iter)
            .filter(|(_, entry)| entry.bookmarked)
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Number of recorded entries in a dataset.
    #[must_use]
    pub fn recorded(&self, category: DatasetCategory) -> usize {
        self.0.get(&category).map_or(0, BTreeMap::len)
    }

    /// Reset one dataset to an empty map.
    pub fn clear_category(&mut self, category: DatasetCategory) {
        self.0.insert(category, DatasetProgress::new());
    }

    /// Recorded `(dataset, id, entry)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (DatasetCategory, &QuestionId, &ProgressEntry)> + '_ {
        self.0
            .iter()
            .flat_map(|(cat, questions)| questions.iter().map(move |(id, entry)| (*cat, id, entry)))
    }
}

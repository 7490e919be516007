use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::dataset::DatasetCategory;
use crate::model::ids::QuestionId;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty: {0}")]
pub struct UnknownDifficultyError(pub String);

/// Curated difficulty of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Sort rank: Easy < Medium < Hard.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDifficultyError(trimmed.to_owned()))
    }
}

//
// ─── PRACTICE LINKS ────────────────────────────────────────────────────────────
//

/// External judge a question can be practiced on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeSite {
    LeetCode,
    GeeksForGeeks,
    HackerRank,
    CodeChef,
}

impl PracticeSite {
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            PracticeSite::LeetCode => "LeetCode",
            PracticeSite::GeeksForGeeks => "GeeksforGeeks",
            PracticeSite::HackerRank => "HackerRank",
            PracticeSite::CodeChef => "CodeChef",
        }
    }
}

/// Optional links to the same problem on external judges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leetcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gfg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackerrank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codechef: Option<String>,
}

impl PracticeLinks {
    /// Present, non-blank links in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PracticeSite, &str)> + '_ {
        [
            (PracticeSite::LeetCode, self.leetcode.as_deref()),
            (PracticeSite::GeeksForGeeks, self.gfg.as_deref()),
            (PracticeSite::HackerRank, self.hackerrank.as_deref()),
            (PracticeSite::CodeChef, self.codechef.as_deref()),
        ]
        .into_iter()
        .filter_map(|(site, url)| match url {
            Some(url) if !url.trim().is_empty() => Some((site, url)),
            _ => None,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A practice question as shipped in the static dataset files.
///
/// `category` is the display category ("Trees", "Pointers", ...), not the
/// dataset the question was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub time_complexity: String,
    #[serde(default)]
    pub space_complexity: String,
    #[serde(default)]
    pub practice_links: PracticeLinks,
}

impl Question {
    /// Case-insensitive substring match over the searchable text fields.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn contains_term(&self, needle: &str) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(needle);
        hit(&self.title)
            || hit(&self.description)
            || self.tags.iter().any(|tag| hit(tag))
            || self.companies.iter().any(|company| hit(company))
            || hit(&self.category)
    }
}

/// A question annotated with the dataset it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub source: DatasetCategory,
    pub source_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "dsa-1",
        "title": "Two Sum",
        "description": "Find two numbers adding up to a target.",
        "difficulty": "Easy",
        "category": "Arrays",
        "tags": ["hashing", "array"],
        "companies": ["Zoho", "Amazon"],
        "hints": ["Use a map"],
        "timeComplexity": "O(n)",
        "spaceComplexity": "O(n)",
        "practiceLinks": { "leetcode": "https://leetcode.com/problems/two-sum/", "gfg": "" }
    }"#;

    #[test]
    fn deserializes_dataset_shape() {
        let q: Question = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(q.id, QuestionId::new("dsa-1"));
        assert_eq!(q.difficulty, Difficulty::Easy);
        assert_eq!(q.time_complexity, "O(n)");
        assert_eq!(q.hints, vec!["Use a map".to_string()]);
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let q: Question =
            serde_json::from_str(r#"{"id":"x","title":"T","difficulty":"Hard"}"#).unwrap();
        assert!(q.tags.is_empty());
        assert!(q.companies.is_empty());
        assert_eq!(q.practice_links, PracticeLinks::default());
    }

    #[test]
    fn practice_links_skip_blank_entries() {
        let q: Question = serde_json::from_str(SAMPLE).unwrap();
        let sites: Vec<_> = q.practice_links.iter().map(|(site, _)| site).collect();
        assert_eq!(sites, vec![PracticeSite::LeetCode]);
    }

    #[test]
    fn contains_term_checks_every_text_field() {
        let q: Question = serde_json::from_str(SAMPLE).unwrap();
        assert!(q.contains_term("two sum"));
        assert!(q.contains_term("target"));
        assert!(q.contains_term("hashing"));
        assert!(q.contains_term("amazon"));
        assert!(q.contains_term("arrays"));
        assert!(!q.contains_term("graph"));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" Medium ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}

use std::fmt::Write as _;

use practice_core::model::{
    CategoryStats, DatasetCategory, ProgressEntry, ProgressStatus, Question, TaggedQuestion,
};

fn status_marker(status: ProgressStatus) -> &'static str {
    match status {
        ProgressStatus::Unsolved => "[ ]",
        ProgressStatus::Attempted => "[~]",
        ProgressStatus::Solved => "[x]",
    }
}

fn bookmark_marker(bookmarked: bool) -> &'static str {
    if bookmarked { "*" } else { " " }
}

/// One line per dataset: label, solved/total, attempted, percentage.
pub fn overview(rows: &[(DatasetCategory, &str, CategoryStats)]) -> String {
    let width = rows.iter().map(|(_, label, _)| label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (dataset, label, stats) in rows {
        let _ = writeln!(
            out,
            "{label:<width$}  {solved:>3}/{total:<3} solved  {attempted:>3} attempted  {pct:>3.0}%  ({dataset})",
            solved = stats.solved,
            total = stats.total,
            attempted = stats.attempted,
            pct = stats.completion_percent(),
        );
    }
    out
}

pub fn question_row(question: &Question, entry: ProgressEntry) -> String {
    format!(
        "{status} {mark} {id:<12} {difficulty:<6}  {title}  [{category}]",
        status = status_marker(entry.status),
        mark = bookmark_marker(entry.bookmarked),
        id = question.id.as_str(),
        difficulty = question.difficulty,
        title = question.title,
        category = question.category,
    )
}

pub fn tagged_row(row: &TaggedQuestion, entry: ProgressEntry) -> String {
    format!(
        "{}  <{}>",
        question_row(&row.question, entry),
        row.source_name
    )
}

/// Full question card: metadata, description, hints and practice links.
pub fn question_detail(question: &Question, entry: ProgressEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", question.title, question.id);
    let _ = writeln!(
        out,
        "difficulty: {}  category: {}  status: {}{}",
        question.difficulty,
        question.category,
        entry.status,
        if entry.bookmarked { "  bookmarked" } else { "" },
    );
    if !question.tags.is_empty() {
        let _ = writeln!(out, "tags: {}", question.tags.join(", "));
    }
    if !question.companies.is_empty() {
        let _ = writeln!(out, "companies: {}", question.companies.join(", "));
    }
    if !question.description.is_empty() {
        let _ = writeln!(out, "\n{}", question.description);
    }
    if !question.hints.is_empty() {
        let _ = writeln!(out, "\nhints:");
        for hint in &question.hints {
            let _ = writeln!(out, "  - {hint}");
        }
    }
    if !question.time_complexity.is_empty() || !question.space_complexity.is_empty() {
        let _ = writeln!(
            out,
            "\ntime: {}  space: {}",
            question.time_complexity, question.space_complexity
        );
    }
    for (site, url) in question.practice_links.iter() {
        let _ = writeln!(out, "{}: {url}", site.display_name());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use practice_core::model::{Difficulty, PracticeLinks, QuestionId};

    fn question() -> Question {
        Question {
            id: QuestionId::new("dsa-7"),
            title: "LRU Cache".to_owned(),
            description: "Design a cache.".to_owned(),
            difficulty: Difficulty::Medium,
            category: "Design".to_owned(),
            tags: vec!["hashmap".to_owned()],
            companies: Vec::new(),
            hints: vec!["Use a linked list".to_owned()],
            time_complexity: "O(1)".to_owned(),
            space_complexity: "O(n)".to_owned(),
            practice_links: PracticeLinks {
                leetcode: Some("https://leetcode.com/problems/lru-cache/".to_owned()),
                ..PracticeLinks::default()
            },
        }
    }

    #[test]
    fn row_shows_status_and_bookmark() {
        let entry = ProgressEntry {
            status: ProgressStatus::Solved,
            bookmarked: true,
        };
        let row = question_row(&question(), entry);
        assert!(row.starts_with("[x] * dsa-7"));
        assert!(row.ends_with("LRU Cache  [Design]"));
    }

    #[test]
    fn detail_lists_hints_and_links() {
        let text = question_detail(&question(), ProgressEntry::default());
        assert!(text.contains("status: unsolved"));
        assert!(text.contains("  - Use a linked list"));
        assert!(text.contains("LeetCode: https://leetcode.com/problems/lru-cache/"));
        assert!(!text.contains("companies:"));
    }

    #[test]
    fn overview_reports_percentages() {
        let stats = CategoryStats {
            solved: 5,
            attempted: 2,
            total: 50,
        };
        let text = overview(&[(DatasetCategory::ZohoDsa, "Zoho DSA", stats)]);
        assert!(text.contains("5/50"));
        assert!(text.contains("10%"));
    }
}

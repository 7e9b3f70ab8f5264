//! Core data model types for quizbank.
//!
//! These are the fundamental types shared by the loader, the filter engine
//! and the session: questions as loaded from the bank, and the sort modes a
//! view can be ordered by.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Every difficulty a question can carry.
pub const DIFFICULTY_LEVELS: RangeInclusive<u8> = 1..=5;

/// A single quiz question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier within the loaded bank.
    pub id: u32,
    /// The question prompt.
    pub question: String,
    /// The expected answer.
    pub answer: String,
    /// Difficulty from 1 (easiest) to 5.
    pub difficulty: u8,
    /// Category labels, in source order.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Question {
    /// Returns `true` if any of this question's categories is in `wanted`.
    pub fn has_any_category<'a, I>(&self, wanted: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        wanted.into_iter().any(|c| self.categories.contains(c))
    }
}

/// A question as it appears in the source data.
///
/// Both the Slovenian field names and English ones are accepted.
/// A missing or zero `id` is filled in from the record's position.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(alias = "vprašanje", alias = "questionText")]
    pub question: String,
    #[serde(alias = "odgovor", alias = "answerText")]
    pub answer: String,
    #[serde(alias = "težavnost")]
    pub difficulty: u8,
    #[serde(default, alias = "kategorije")]
    pub categories: Vec<String>,
}

impl QuestionRecord {
    /// Convert into a [`Question`], using `position` (1-based) when the
    /// record carries no usable id.
    pub fn into_question(self, position: u32) -> Question {
        let id = match self.id {
            Some(id) if id > 0 => id,
            _ => position,
        };
        Question {
            id,
            question: self.question,
            answer: self.answer,
            difficulty: self.difficulty,
            categories: self.categories,
        }
    }
}

/// How the visible list is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Ascending difficulty, ties kept in load order.
    #[default]
    Difficulty,
    /// Slovenian-collated question text, ties kept in load order.
    Alphabetical,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Difficulty => write!(f, "difficulty"),
            SortMode::Alphabetical => write!(f, "alphabetical"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "difficulty" | "by-difficulty" => Ok(SortMode::Difficulty),
            "alphabetical" | "alpha" | "abc" => Ok(SortMode::Alphabetical),
            other => Err(format!("unknown sort mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_mode_display_and_parse() {
        assert_eq!(SortMode::Difficulty.to_string(), "difficulty");
        assert_eq!(SortMode::Alphabetical.to_string(), "alphabetical");
        assert_eq!(
            "Alphabetical".parse::<SortMode>().unwrap(),
            SortMode::Alphabetical
        );
        assert_eq!("abc".parse::<SortMode>().unwrap(), SortMode::Alphabetical);
        assert_eq!("difficulty".parse::<SortMode>().unwrap(), SortMode::Difficulty);
        assert!("random".parse::<SortMode>().is_err());
        assert_eq!(SortMode::default(), SortMode::Difficulty);
    }

    #[test]
    fn record_accepts_slovenian_field_names() {
        let json = r#"{
            "vprašanje": "Koliko je 2 + 2?",
            "odgovor": "4",
            "težavnost": 1,
            "kategorije": ["matematika"]
        }"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();
        let q = record.into_question(7);
        assert_eq!(q.id, 7);
        assert_eq!(q.answer, "4");
        assert_eq!(q.difficulty, 1);
        assert_eq!(q.categories, vec!["matematika"]);
    }

    #[test]
    fn record_keeps_explicit_id_but_not_zero() {
        let with_id: QuestionRecord = serde_json::from_str(
            r#"{"id": 42, "question": "q", "answer": "a", "difficulty": 3}"#,
        )
        .unwrap();
        assert_eq!(with_id.into_question(1).id, 42);

        let zero_id: QuestionRecord = serde_json::from_str(
            r#"{"id": 0, "question": "q", "answer": "a", "difficulty": 3}"#,
        )
        .unwrap();
        let q = zero_id.into_question(5);
        assert_eq!(q.id, 5);
        assert!(q.categories.is_empty());
    }

    #[test]
    fn has_any_category() {
        let q = Question {
            id: 1,
            question: "q".into(),
            answer: "a".into(),
            difficulty: 2,
            categories: vec!["math".into(), "logic".into()],
        };
        let wanted = ["logic".to_string()];
        assert!(q.has_any_category(&wanted));
        let other = ["history".to_string()];
        assert!(!q.has_any_category(&other));
        let none: Vec<String> = Vec::new();
        assert!(!q.has_any_category(&none));
    }
}

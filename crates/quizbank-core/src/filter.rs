//! Filter state and the pure filter engine.
//!
//! [`apply`] maps a bank, a [`FilterState`] and a favorite set to the ordered
//! list of visible questions. Every clause of the predicate is AND'd and an
//! unconstrained clause passes trivially.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::collation;
use crate::favorites::FavoriteSet;
use crate::model::{Question, SortMode};

/// The accepted values of one facet.
///
/// `MatchAll` and `MatchNone` are both reachable from the group's master
/// control and must stay distinct: checking the master clears the constraint,
/// unchecking it fills the constraint with every known value and rejects
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum FacetConstraint<T: Ord> {
    /// No restriction.
    #[default]
    MatchAll,
    /// Only these values pass. Never empty.
    Only(BTreeSet<T>),
    /// Nothing passes. Carries the full set of known values.
    MatchNone(BTreeSet<T>),
}

impl<T: Ord + Clone> FacetConstraint<T> {
    /// The constraint viewed as a plain set; empty means no restriction.
    pub fn values(&self) -> BTreeSet<T> {
        match self {
            FacetConstraint::MatchAll => BTreeSet::new(),
            FacetConstraint::Only(values) | FacetConstraint::MatchNone(values) => values.clone(),
        }
    }

    pub fn is_match_all(&self) -> bool {
        matches!(self, FacetConstraint::MatchAll)
    }

    pub fn is_match_none(&self) -> bool {
        matches!(self, FacetConstraint::MatchNone(_))
    }

    /// Add `value` to the accepted set.
    pub fn include(&mut self, value: T) {
        match self {
            FacetConstraint::Only(values) => {
                values.insert(value);
            }
            FacetConstraint::MatchAll | FacetConstraint::MatchNone(_) => {
                *self = FacetConstraint::Only(BTreeSet::from([value]));
            }
        }
    }

    /// Remove `value` from the accepted set. Emptying the set lifts the
    /// restriction; excluding from match-all or match-none changes nothing.
    pub fn exclude(&mut self, value: &T) {
        if let FacetConstraint::Only(values) = self {
            values.remove(value);
            if values.is_empty() {
                *self = FacetConstraint::MatchAll;
            }
        }
    }

    /// Returns `true` if `accepts` holds for the constraint's set, or if
    /// there is no restriction.
    fn admits(&self, accepts: impl FnOnce(&BTreeSet<T>) -> bool) -> bool {
        match self {
            FacetConstraint::MatchAll => true,
            FacetConstraint::Only(values) => accepts(values),
            FacetConstraint::MatchNone(_) => false,
        }
    }
}

/// The current selection driving the visible list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub difficulties: FacetConstraint<u8>,
    pub categories: FacetConstraint<String>,
    /// Lower-cased, trimmed search text; empty means no restriction.
    search_query: String,
    pub sort_by: SortMode,
    pub favorites_only: bool,
}

impl FilterState {
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Store `text` trimmed and lower-cased.
    pub fn set_search_query(&mut self, text: &str) {
        self.search_query = text.trim().to_lowercase();
    }

    /// Returns `true` if `question` passes every clause.
    pub fn matches(&self, question: &Question, favorites: &FavoriteSet) -> bool {
        if self.favorites_only && !favorites.contains(question.id) {
            return false;
        }
        if !self
            .difficulties
            .admits(|wanted| wanted.contains(&question.difficulty))
        {
            return false;
        }
        if !self
            .categories
            .admits(|wanted| question.has_any_category(wanted))
        {
            return false;
        }
        if !self.search_query.is_empty() {
            let in_question = question.question.to_lowercase().contains(&self.search_query);
            if !in_question && !question.answer.to_lowercase().contains(&self.search_query) {
                return false;
            }
        }
        true
    }
}

/// Filter then sort `questions`. Pure; the input order is the tiebreaker.
pub fn apply<'a>(
    questions: &'a [Question],
    filter: &FilterState,
    favorites: &FavoriteSet,
) -> Vec<&'a Question> {
    let mut visible: Vec<&Question> = questions
        .iter()
        .filter(|q| filter.matches(q, favorites))
        .collect();
    sort(&mut visible, filter.sort_by);
    visible
}

/// Stable in-place sort of an already filtered list.
pub fn sort(visible: &mut [&Question], mode: SortMode) {
    match mode {
        SortMode::Difficulty => visible.sort_by_key(|q| q.difficulty),
        SortMode::Alphabetical => visible.sort_by_cached_key(|q| collation::sort_key(&q.question)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: u32, difficulty: u8, categories: &[&str], question: &str, answer: &str) -> Question {
        Question {
            id,
            question: question.into(),
            answer: answer.into(),
            difficulty,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn bank() -> Vec<Question> {
        vec![
            q(1, 2, &["math"], "What is two plus two?", "Four"),
            q(2, 4, &["logic"], "All men are mortal...", "Socrates is mortal"),
            q(3, 2, &["math", "logic"], "Is every square a rectangle?", "Yes"),
        ]
    }

    fn ids(list: &[&Question]) -> Vec<u32> {
        list.iter().map(|q| q.id).collect()
    }

    #[test]
    fn unconstrained_state_keeps_load_order_before_sort() {
        let questions = bank();
        let visible: Vec<&Question> = questions
            .iter()
            .filter(|q| FilterState::default().matches(q, &FavoriteSet::default()))
            .collect();
        assert_eq!(ids(&visible), vec![1, 2, 3]);
    }

    #[test]
    fn difficulty_filter_is_stable() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.difficulties.include(2);
        let visible = apply(&questions, &filter, &FavoriteSet::default());
        assert_eq!(ids(&visible), vec![1, 3]);
    }

    #[test]
    fn search_matches_answer_text() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.set_search_query("  SOCRATES ");
        assert_eq!(filter.search_query(), "socrates");
        let visible = apply(&questions, &filter, &FavoriteSet::default());
        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn search_matches_question_text_case_insensitively() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.set_search_query("rectangle");
        assert_eq!(ids(&apply(&questions, &filter, &FavoriteSet::default())), vec![3]);

        filter.set_search_query("   ");
        assert_eq!(apply(&questions, &filter, &FavoriteSet::default()).len(), 3);
    }

    #[test]
    fn favorites_only_with_empty_set_is_empty() {
        let questions = bank();
        let filter = FilterState {
            favorites_only: true,
            ..Default::default()
        };
        assert!(apply(&questions, &filter, &FavoriteSet::default()).is_empty());
    }

    #[test]
    fn favorites_only_keeps_favorites() {
        let questions = bank();
        let filter = FilterState {
            favorites_only: true,
            ..Default::default()
        };
        let favorites = FavoriteSet::from_iter([2]);
        assert_eq!(ids(&apply(&questions, &filter, &favorites)), vec![2]);
    }

    #[test]
    fn category_filter_needs_one_shared_category() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.categories.include("logic".to_string());
        assert_eq!(
            ids(&apply(&questions, &filter, &FavoriteSet::default())),
            vec![3, 2]
        );
    }

    #[test]
    fn unknown_facet_values_never_match() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.categories.include("history".to_string());
        assert!(apply(&questions, &filter, &FavoriteSet::default()).is_empty());

        let mut filter = FilterState::default();
        filter.difficulties.include(9);
        assert!(apply(&questions, &filter, &FavoriteSet::default()).is_empty());
    }

    #[test]
    fn match_none_rejects_everything() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.categories =
            FacetConstraint::MatchNone(BTreeSet::from(["logic".to_string(), "math".to_string()]));
        assert!(apply(&questions, &filter, &FavoriteSet::default()).is_empty());
        assert_eq!(filter.categories.values().len(), 2);
    }

    #[test]
    fn clauses_are_anded() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.difficulties.include(2);
        filter.categories.include("logic".to_string());
        filter.set_search_query("yes");
        assert_eq!(ids(&apply(&questions, &filter, &FavoriteSet::default())), vec![3]);

        filter.set_search_query("four");
        assert!(apply(&questions, &filter, &FavoriteSet::default()).is_empty());
    }

    #[test]
    fn alphabetical_sort_uses_slovenian_order_and_is_stable() {
        let questions = vec![
            q(1, 1, &[], "Čebela", "a"),
            q(2, 1, &[], "Cesta", "b"),
            q(3, 1, &[], "Drevo", "c"),
            q(4, 1, &[], "Cesta", "d"),
        ];
        let filter = FilterState {
            sort_by: SortMode::Alphabetical,
            ..Default::default()
        };
        let visible = apply(&questions, &filter, &FavoriteSet::default());
        assert_eq!(ids(&visible), vec![2, 4, 1, 3]);
    }

    #[test]
    fn apply_is_idempotent() {
        let questions = bank();
        let mut filter = FilterState::default();
        filter.categories.include("math".to_string());
        let first = ids(&apply(&questions, &filter, &FavoriteSet::default()));
        let second = ids(&apply(&questions, &filter, &FavoriteSet::default()));
        assert_eq!(first, second);
    }

    #[test]
    fn constraint_transitions() {
        let mut c: FacetConstraint<u8> = FacetConstraint::MatchAll;
        c.exclude(&3);
        assert!(c.is_match_all());

        c.include(3);
        assert_eq!(c, FacetConstraint::Only(BTreeSet::from([3])));
        c.include(4);
        c.exclude(&3);
        assert_eq!(c.values(), BTreeSet::from([4]));
        c.exclude(&4);
        assert!(c.is_match_all());

        let mut none = FacetConstraint::MatchNone(BTreeSet::from([1, 2, 3, 4, 5]));
        none.exclude(&2);
        assert!(none.is_match_none());
        assert_eq!(none.values().len(), 5);
        none.include(2);
        assert_eq!(none, FacetConstraint::Only(BTreeSet::from([2])));
    }
}

//! Master/child checkbox synchronization for facet groups.
//!
//! Each group has one master ("all") control and one child per facet value.
//! Toggling the master sets every child and rewrites the group's constraint;
//! toggling a child edits the constraint and the master's checked state is
//! derived from the children.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::filter::{FacetConstraint, FilterState};
use crate::model::DIFFICULTY_LEVELS;

/// Checked state of one facet group's child controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetGroup<T: Ord> {
    values: Vec<T>,
    checked: BTreeSet<T>,
}

impl<T: Ord + Clone> FacetGroup<T> {
    /// A group over `values` with every child checked.
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        let checked = values.iter().cloned().collect();
        Self { values, checked }
    }

    /// The enumerated child values, in display order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn is_checked(&self, value: &T) -> bool {
        self.checked.contains(value)
    }

    /// The master is checked iff every child is.
    pub fn master_checked(&self) -> bool {
        self.values.iter().all(|v| self.checked.contains(v))
    }

    /// Master toggled: set every child, and either lift the constraint
    /// (checked) or reject everything with the full value set (unchecked).
    pub fn set_all(&mut self, included: bool, constraint: &mut FacetConstraint<T>) {
        if included {
            self.checked = self.values.iter().cloned().collect();
            *constraint = FacetConstraint::MatchAll;
        } else {
            self.checked.clear();
            *constraint = FacetConstraint::MatchNone(self.values.iter().cloned().collect());
        }
    }

    /// Child toggled: update its checkbox and add or remove the value from
    /// the constraint. Values with no child only touch the constraint.
    pub fn set_value(&mut self, value: T, included: bool, constraint: &mut FacetConstraint<T>) {
        let known = self.values.contains(&value);
        if included {
            if known {
                self.checked.insert(value.clone());
            }
            constraint.include(value);
        } else {
            self.checked.remove(&value);
            constraint.exclude(&value);
        }
    }

    /// Back to the initial state: every child checked.
    pub fn reset(&mut self) {
        self.checked = self.values.iter().cloned().collect();
    }
}

/// Master control states handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MasterStates {
    pub all_difficulties: bool,
    pub all_categories: bool,
}

/// Both facet groups of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetSyncController {
    difficulties: FacetGroup<u8>,
    categories: FacetGroup<String>,
}

impl FacetSyncController {
    /// Groups for difficulties 1–5 and for `categories`, all checked.
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a String>) -> Self {
        Self {
            difficulties: FacetGroup::new(DIFFICULTY_LEVELS),
            categories: FacetGroup::new(categories.into_iter().cloned()),
        }
    }

    pub fn difficulties(&self) -> &FacetGroup<u8> {
        &self.difficulties
    }

    pub fn categories(&self) -> &FacetGroup<String> {
        &self.categories
    }

    pub fn masters(&self) -> MasterStates {
        MasterStates {
            all_difficulties: self.difficulties.master_checked(),
            all_categories: self.categories.master_checked(),
        }
    }

    pub fn set_difficulty(&mut self, filter: &mut FilterState, level: u8, included: bool) {
        self.difficulties
            .set_value(level, included, &mut filter.difficulties);
    }

    pub fn set_all_difficulties(&mut self, filter: &mut FilterState, included: bool) {
        self.difficulties.set_all(included, &mut filter.difficulties);
    }

    pub fn set_category(&mut self, filter: &mut FilterState, name: &str, included: bool) {
        self.categories
            .set_value(name.to_string(), included, &mut filter.categories);
    }

    pub fn set_all_categories(&mut self, filter: &mut FilterState, included: bool) {
        self.categories.set_all(included, &mut filter.categories);
    }

    /// Restore the initial state: every control checked and the whole
    /// filter state back to defaults. Favorites are not part of it.
    pub fn reset(&mut self, filter: &mut FilterState) {
        self.difficulties.reset();
        self.categories.reset();
        *filter = FilterState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortMode;

    fn categories() -> Vec<String> {
        vec!["logic".to_string(), "math".to_string()]
    }

    #[test]
    fn initial_state_all_checked_and_unrestricted() {
        let cats = categories();
        let controller = FacetSyncController::new(&cats);
        assert_eq!(
            controller.masters(),
            MasterStates {
                all_difficulties: true,
                all_categories: true
            }
        );
        assert!(DIFFICULTY_LEVELS.clone().all(|d| controller.difficulties().is_checked(&d)));
        assert_eq!(controller.categories().values(), cats.as_slice());
    }

    #[test]
    fn unchecking_master_fills_constraint_with_every_value() {
        let cats = categories();
        let mut controller = FacetSyncController::new(&cats);
        let mut filter = FilterState::default();

        controller.set_all_categories(&mut filter, false);
        assert!(filter.categories.is_match_none());
        assert_eq!(
            filter.categories.values(),
            BTreeSet::from(["logic".to_string(), "math".to_string()])
        );
        assert!(!controller.masters().all_categories);
        assert!(!controller.categories().is_checked(&"math".to_string()));

        controller.set_all_difficulties(&mut filter, false);
        assert_eq!(filter.difficulties.values(), BTreeSet::from([1, 2, 3, 4, 5]));
    }

    #[test]
    fn checking_master_lifts_constraint() {
        let mut controller = FacetSyncController::new(&categories());
        let mut filter = FilterState::default();

        controller.set_all_difficulties(&mut filter, false);
        controller.set_all_difficulties(&mut filter, true);
        assert!(filter.difficulties.is_match_all());
        assert!(controller.masters().all_difficulties);
    }

    #[test]
    fn child_toggle_edits_constraint_and_derives_master() {
        let mut controller = FacetSyncController::new(&categories());
        let mut filter = FilterState::default();

        controller.set_difficulty(&mut filter, 3, false);
        assert!(!controller.masters().all_difficulties);
        // Removing from an empty constraint leaves it unrestricted.
        assert!(filter.difficulties.is_match_all());

        controller.set_difficulty(&mut filter, 3, true);
        assert!(controller.masters().all_difficulties);
        assert_eq!(filter.difficulties.values(), BTreeSet::from([3]));
    }

    #[test]
    fn checking_children_one_by_one_rechecks_master() {
        let mut controller = FacetSyncController::new(&categories());
        let mut filter = FilterState::default();

        controller.set_all_difficulties(&mut filter, false);
        for level in 1..=4 {
            controller.set_difficulty(&mut filter, level, true);
            assert!(!controller.masters().all_difficulties);
        }
        controller.set_difficulty(&mut filter, 5, true);
        assert!(controller.masters().all_difficulties);
        assert_eq!(filter.difficulties.values(), BTreeSet::from([1, 2, 3, 4, 5]));
        assert!(!filter.difficulties.is_match_none());
    }

    #[test]
    fn master_checked_iff_every_child_checked() {
        let values = ["a", "b", "c"].map(String::from);
        for mask in 0u8..8 {
            let mut group = FacetGroup::new(values.clone());
            let mut constraint = FacetConstraint::MatchAll;
            for (bit, v) in values.iter().enumerate() {
                let included = mask & (1 << bit) != 0;
                group.set_value(v.clone(), included, &mut constraint);
            }
            assert_eq!(group.master_checked(), mask == 0b111, "mask {mask:03b}");
        }
    }

    #[test]
    fn empty_group_master_is_checked() {
        let group: FacetGroup<String> = FacetGroup::new(Vec::new());
        assert!(group.master_checked());
    }

    #[test]
    fn unknown_value_only_touches_constraint() {
        let mut controller = FacetSyncController::new(&categories());
        let mut filter = FilterState::default();

        controller.set_category(&mut filter, "history", true);
        assert!(controller.masters().all_categories);
        assert_eq!(
            filter.categories.values(),
            BTreeSet::from(["history".to_string()])
        );
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut controller = FacetSyncController::new(&categories());
        let mut filter = FilterState::default();

        controller.set_all_categories(&mut filter, false);
        controller.set_difficulty(&mut filter, 2, true);
        filter.set_search_query("abc");
        filter.sort_by = SortMode::Alphabetical;
        filter.favorites_only = true;

        controller.reset(&mut filter);
        assert_eq!(filter, FilterState::default());
        assert_eq!(
            controller,
            FacetSyncController::new(&categories())
        );
    }
}

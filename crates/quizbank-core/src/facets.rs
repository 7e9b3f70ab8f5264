//! Static per-facet question counts.
//!
//! Counts are taken over the whole bank right after it loads and are never
//! recomputed as filters change: they report how many questions exist for a
//! facet value, not how many are currently visible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::loader::QuestionStore;
use crate::model::DIFFICULTY_LEVELS;

/// Question counts for every facet value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCounts {
    /// Size of the whole bank, shown next to both "all" controls.
    pub total: usize,
    /// Count per difficulty; every level in 1–5 is present, possibly zero.
    pub difficulties: BTreeMap<u8, usize>,
    /// Count per category in the category universe.
    pub categories: BTreeMap<String, usize>,
}

impl FacetCounts {
    /// Count every facet value across the entire store.
    pub fn compute(store: &QuestionStore) -> Self {
        let mut difficulties: BTreeMap<u8, usize> =
            DIFFICULTY_LEVELS.map(|level| (level, 0)).collect();
        let mut categories: BTreeMap<String, usize> = store
            .categories()
            .iter()
            .map(|c| (c.clone(), 0))
            .collect();

        for q in store.questions() {
            if let Some(n) = difficulties.get_mut(&q.difficulty) {
                *n += 1;
            }
            // A category listed twice on one question still counts once.
            for (category, n) in categories.iter_mut() {
                if q.categories.contains(category) {
                    *n += 1;
                }
            }
        }

        Self {
            total: store.len(),
            difficulties,
            categories,
        }
    }

    pub fn difficulty(&self, level: u8) -> usize {
        self.difficulties.get(&level).copied().unwrap_or(0)
    }

    pub fn category(&self, name: &str) -> usize {
        self.categories.get(name).copied().unwrap_or(0)
    }
}

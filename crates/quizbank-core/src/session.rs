//! The browsing session: explicit owner of all mutable state.
//!
//! A [`Session`] holds the load outcome, the filter state, the facet
//! controls and the favorites. Every event method mutates that state
//! synchronously and returns a fresh [`ViewSnapshot`] for the renderer.

use serde::Serialize;
use tracing::debug;

use crate::error::LoadError;
use crate::facets::FacetCounts;
use crate::favorites::FavoritesStore;
use crate::filter::{self, FilterState};
use crate::loader::{load_questions, QuestionSource, QuestionStore};
use crate::model::{Question, SortMode};
use crate::sync::{FacetSyncController, MasterStates};

/// Outcome of the one-shot bank load.
#[derive(Debug)]
pub enum LoadState {
    Loaded {
        store: QuestionStore,
        counts: FacetCounts,
    },
    /// Terminal; the session shows an error instead of questions.
    Failed(LoadError),
}

/// A question as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub is_favorite: bool,
}

/// What the renderer should show besides the list itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewStatus {
    Ready,
    NoResults,
    LoadFailed { message: String },
}

/// Everything a renderer needs after one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub status: ViewStatus,
    pub questions: Vec<VisibleQuestion>,
    pub visible_count: usize,
    pub facet_counts: FacetCounts,
    pub favorite_count: usize,
    pub masters: MasterStates,
    pub favorites_only: bool,
    pub sort_by: SortMode,
    pub search_query: String,
}

impl ViewSnapshot {
    pub fn ids(&self) -> Vec<u32> {
        self.questions.iter().map(|q| q.question.id).collect()
    }
}

/// Session state for one user browsing one bank.
#[derive(Debug)]
pub struct Session {
    load: LoadState,
    filter: FilterState,
    facets: FacetSyncController,
    favorites: FavoritesStore,
}

impl Session {
    /// Build a session from a load outcome and already-restored favorites.
    pub fn new(loaded: Result<QuestionStore, LoadError>, favorites: FavoritesStore) -> Self {
        let load = match loaded {
            Ok(store) => {
                let counts = FacetCounts::compute(&store);
                LoadState::Loaded { store, counts }
            }
            Err(e) => {
                tracing::error!("question bank failed to load: {e}");
                LoadState::Failed(e)
            }
        };
        let facets = match &load {
            LoadState::Loaded { store, .. } => FacetSyncController::new(store.categories()),
            LoadState::Failed(_) => FacetSyncController::new(std::iter::empty()),
        };

        Self {
            load,
            filter: FilterState::default(),
            facets,
            favorites,
        }
    }

    /// Load the bank from `source` and start a session around it.
    pub async fn start(source: &dyn QuestionSource, favorites: FavoritesStore) -> Self {
        Self::new(load_questions(source).await, favorites)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.load {
            LoadState::Failed(e) => Some(e),
            LoadState::Loaded { .. } => None,
        }
    }

    /// Loaded questions in load order; empty after a failed load.
    pub fn questions(&self) -> &[Question] {
        match &self.load {
            LoadState::Loaded { store, .. } => store.questions(),
            LoadState::Failed(_) => &[],
        }
    }

    pub fn facet_counts(&self) -> FacetCounts {
        match &self.load {
            LoadState::Loaded { counts, .. } => counts.clone(),
            LoadState::Failed(_) => FacetCounts::default(),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn facets(&self) -> &FacetSyncController {
        &self.facets
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Recompute the visible list for the current state.
    pub fn view(&self) -> ViewSnapshot {
        let visible = filter::apply(self.questions(), &self.filter, self.favorites.set());
        let questions: Vec<VisibleQuestion> =
            visible.into_iter().map(|q| self.annotate(q)).collect();

        let status = match &self.load {
            LoadState::Failed(e) => ViewStatus::LoadFailed {
                message: e.to_string(),
            },
            LoadState::Loaded { .. } if questions.is_empty() => ViewStatus::NoResults,
            LoadState::Loaded { .. } => ViewStatus::Ready,
        };

        ViewSnapshot {
            status,
            visible_count: questions.len(),
            questions,
            facet_counts: self.facet_counts(),
            favorite_count: self.favorites.count(),
            masters: self.facets.masters(),
            favorites_only: self.filter.favorites_only,
            sort_by: self.filter.sort_by,
            search_query: self.filter.search_query().to_string(),
        }
    }

    /// Every favorited question in load order, ignoring the filters.
    pub fn favorites_view(&self) -> Vec<VisibleQuestion> {
        self.questions()
            .iter()
            .filter(|q| self.favorites.is_favorite(q.id))
            .map(|q| self.annotate(q))
            .collect()
    }

    fn annotate(&self, question: &Question) -> VisibleQuestion {
        VisibleQuestion {
            question: question.clone(),
            is_favorite: self.favorites.is_favorite(question.id),
        }
    }

    pub fn set_difficulty(&mut self, level: u8, included: bool) -> ViewSnapshot {
        debug!(level, included, "set difficulty");
        self.facets
            .set_difficulty(&mut self.filter, level, included);
        self.view()
    }

    pub fn set_all_difficulties(&mut self, included: bool) -> ViewSnapshot {
        debug!(included, "set all difficulties");
        self.facets.set_all_difficulties(&mut self.filter, included);
        self.view()
    }

    pub fn set_category(&mut self, name: &str, included: bool) -> ViewSnapshot {
        debug!(category = name, included, "set category");
        self.facets.set_category(&mut self.filter, name, included);
        self.view()
    }

    pub fn set_all_categories(&mut self, included: bool) -> ViewSnapshot {
        debug!(included, "set all categories");
        self.facets.set_all_categories(&mut self.filter, included);
        self.view()
    }

    pub fn set_search_query(&mut self, text: &str) -> ViewSnapshot {
        self.filter.set_search_query(text);
        debug!(query = self.filter.search_query(), "set search query");
        self.view()
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) -> ViewSnapshot {
        debug!(%mode, "set sort mode");
        self.filter.sort_by = mode;
        self.view()
    }

    pub fn toggle_favorites_only(&mut self) -> ViewSnapshot {
        self.filter.favorites_only = !self.filter.favorites_only;
        debug!(favorites_only = self.filter.favorites_only, "toggle favorites only");
        self.view()
    }

    pub fn toggle_favorite(&mut self, id: u32) -> ViewSnapshot {
        let now_favorite = self.favorites.toggle(id);
        debug!(id, now_favorite, "toggle favorite");
        self.view()
    }

    /// Restore every control and filter to its initial state. Favorites stay.
    pub fn reset(&mut self) -> ViewSnapshot {
        debug!("reset filters");
        self.facets.reset(&mut self.filter);
        self.view()
    }
}

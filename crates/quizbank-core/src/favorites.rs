//! Favorite questions and their persistence.
//!
//! The set is restored once at startup and written back in full after every
//! toggle. Storage problems never reach the caller: a missing or corrupt slot
//! reads as an empty set, and a failed write is logged while the in-memory
//! set stays authoritative.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

/// Slot name used when none is configured.
pub const DEFAULT_FAVORITES_KEY: &str = "favoriteQuestions";

/// Ids of favorited questions. Serializes as an ascending list, so the first
/// write canonicalizes an unordered or duplicated slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeSet<u32>);

impl FavoriteSet {
    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Flip membership of `id`. Returns `true` if it is now a favorite.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }
}

impl FromIterator<u32> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The favorite set bound to its storage slot.
pub struct FavoritesStore {
    set: FavoriteSet,
    storage: Box<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("set", &self.set)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl FavoritesStore {
    /// Restore the set from `storage` under `key`.
    pub fn open(storage: Box<dyn KeyValueStore>, key: &str) -> Self {
        let set = load(storage.as_ref(), key);
        tracing::debug!(favorites = set.len(), key, "favorites restored");
        Self {
            set,
            storage,
            key: key.to_string(),
        }
    }

    pub fn set(&self) -> &FavoriteSet {
        &self.set
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.set.contains(id)
    }

    pub fn count(&self) -> usize {
        self.set.len()
    }

    /// Flip `id` and persist the whole set. Returns the new membership.
    pub fn toggle(&mut self, id: u32) -> bool {
        let now_favorite = self.set.toggle(id);
        save(self.storage.as_mut(), &self.key, &self.set);
        now_favorite
    }
}

/// Read the favorite set from `key`; absence or corruption yields an empty set.
pub fn load(storage: &dyn KeyValueStore, key: &str) -> FavoriteSet {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return FavoriteSet::default(),
        Err(e) => {
            tracing::warn!("favorites storage unreadable, starting empty: {e:#}");
            return FavoriteSet::default();
        }
    };

    match serde_json::from_str::<Vec<u32>>(&raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(e) => {
            tracing::warn!("favorites slot '{key}' is corrupt, starting empty: {e}");
            FavoriteSet::default()
        }
    }
}

/// Write the whole set to `key`. Failures are logged, not returned.
pub fn save(storage: &mut dyn KeyValueStore, key: &str, set: &FavoriteSet) {
    let value = match serde_json::to_string(set) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("failed to serialize favorites: {e}");
            return;
        }
    };
    if let Err(e) = storage.set(key, &value) {
        tracing::warn!("failed to persist favorites: {e:#}");
    }
}

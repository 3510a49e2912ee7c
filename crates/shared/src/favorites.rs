//! In-memory favorites store.
//!
//! The store is a handle: clones share the same underlying set, so the
//! application creates one and hands a clone to every screen. Nothing is
//! persisted; the set lives as long as the process.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Shared set of favorited record ids
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    ids: Arc<RwLock<HashSet<String>>>,
}

impl FavoritesStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as a favorite. Adding an existing id is a no-op.
    pub fn add(&self, id: &str) {
        let inserted = self
            .ids
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string());
        debug!(id = id, inserted = inserted, "Favorite added");
    }

    /// Unmark `id`. Removing an absent id is a no-op.
    pub fn remove(&self, id: &str) {
        let removed = self
            .ids
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        debug!(id = id, removed = removed, "Favorite removed");
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }

    /// Independent copy of the current ids; later mutations do not show through it
    pub fn snapshot(&self) -> HashSet<String> {
        self.ids
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.ids.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

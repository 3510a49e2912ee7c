//! My List screen: favorites drawn from a catalog snapshot.

use crate::list::{BindableList, ListUpdate};
use shared::{AnimeRecord, AnimeRow, FavoritesStore};
use tracing::{debug, info};

#[derive(Debug)]
pub struct MyListScreen {
    /// Catalog as it was when the screen was opened
    snapshot: Vec<AnimeRecord>,
    favorites: FavoritesStore,
    list: BindableList<AnimeRow>,
}

impl MyListScreen {
    /// Open the screen over `snapshot` and show the current favorites
    pub fn open(snapshot: Vec<AnimeRecord>, favorites: FavoritesStore) -> Self {
        debug!(total = snapshot.len(), "My List opened");
        let mut screen = Self {
            snapshot,
            favorites,
            list: BindableList::new(),
        };
        screen.resume();
        screen
    }

    /// Recompute the favorites shown from the snapshot
    pub fn resume(&mut self) -> ListUpdate {
        let ids = self.favorites.snapshot();
        let favorites: Vec<AnimeRecord> = self
            .snapshot
            .iter()
            .filter(|record| ids.contains(&record.id))
            .cloned()
            .collect();

        let update = self.list.submit(AnimeRow::resolve_all(favorites, &self.favorites));
        debug!(shown = self.list.len(), "My List refreshed");
        update
    }

    /// Drop `id` from the favorites and refresh.
    ///
    /// Returns whether the entry was on screen.
    pub fn unfavorite(&mut self, id: &str) -> bool {
        let shown = self.list.items().iter().find(|row| row.id() == id);
        let was_shown = shown.is_some();
        if let Some(row) = shown {
            info!(id = id, title = %row.record.title, "Removed from favorites");
        }

        self.favorites.remove(id);
        self.resume();
        was_shown
    }

    pub fn rows(&self) -> &BindableList<AnimeRow> {
        &self.list
    }

    pub fn snapshot(&self) -> &[AnimeRecord] {
        &self.snapshot
    }
}

//! Data models for the catalog.
//!
//! A catalog entry is immutable once decoded. Favorite state is never stored
//! on the record itself; it is looked up in the favorites store whenever a
//! displayable row is built.

use crate::favorites::FavoritesStore;
use serde::{Deserialize, Serialize};

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeRecord {
    /// Stable upstream identifier (MyAnimeList ID as a string)
    pub id: String,
    pub title: String,
    /// Genre names in display order
    pub genres: Vec<String>,
    pub description: String,
    pub image_url: String,
}

impl AnimeRecord {
    /// Genres joined for display, e.g. "Action, Adventure"
    pub fn genre_line(&self) -> String {
        self.genres.join(", ")
    }

    /// Case-insensitive genre membership
    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genres.iter().any(|g| g.to_lowercase() == wanted)
    }
}

/// A record bound for display, with its favorite state resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeRow {
    pub record: AnimeRecord,
    pub is_favorite: bool,
}

impl AnimeRow {
    /// Resolve the favorite flag for `record` against `favorites`
    pub fn resolve(record: AnimeRecord, favorites: &FavoritesStore) -> Self {
        let is_favorite = favorites.contains(&record.id);
        Self {
            record,
            is_favorite,
        }
    }

    /// Build rows for a whole list, preserving order
    pub fn resolve_all(records: Vec<AnimeRecord>, favorites: &FavoritesStore) -> Vec<Self> {
        records
            .into_iter()
            .map(|record| Self::resolve(record, favorites))
            .collect()
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Label of the favorite action offered for this row
    pub fn action_label(&self) -> &'static str {
        if self.is_favorite {
            "Remove"
        } else {
            "Add"
        }
    }
}

#[cfg(test)]
pub(crate) fn record(id: &str, title: &str, genres: &[&str]) -> AnimeRecord {
    AnimeRecord {
        id: id.to_string(),
        title: title.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        description: format!("{} synopsis", title),
        image_url: format!("https://cdn.myanimelist.net/images/anime/{}l.jpg", id),
    }
}

//! Discover screen: the fetched catalog with search, genre chips and
//! favorite toggles.

use super::my_list::MyListScreen;
use crate::list::{BindableList, ListUpdate};
use jikan_client::{CatalogSource, FetchError};
use shared::{available_genres, AnimeRecord, AnimeRow, FavoritesStore, Filter};
use tracing::{debug, error, info};

/// Load state of the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoverState {
    Loading,
    Ready,
    /// Last fetch failed; carries the diagnostic
    Failed(String),
}

/// Identifies one fetch attempt. Only the most recent ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct DiscoverScreen {
    favorites: FavoritesStore,
    /// Full catalog from the last successful fetch
    master: Vec<AnimeRecord>,
    query: String,
    /// Selected chips, in selection order
    selected_genres: Vec<String>,
    state: DiscoverState,
    list: BindableList<AnimeRow>,
    fetch_generation: u64,
}

impl DiscoverScreen {
    pub fn new(favorites: FavoritesStore) -> Self {
        Self {
            favorites,
            master: Vec::new(),
            query: String::new(),
            selected_genres: Vec::new(),
            state: DiscoverState::Loading,
            list: BindableList::new(),
            fetch_generation: 0,
        }
    }

    /// Enter `Loading` for a new fetch; earlier tickets become stale
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.fetch_generation += 1;
        self.state = DiscoverState::Loading;
        debug!(generation = self.fetch_generation, "Catalog fetch started");
        FetchTicket(self.fetch_generation)
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    ///
    /// Returns false when the ticket is stale and the outcome was dropped.
    /// A failure leaves the master list and the displayed rows untouched.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<AnimeRecord>, FetchError>,
    ) -> bool {
        if ticket.0 != self.fetch_generation || self.state != DiscoverState::Loading {
            debug!(
                ticket = ticket.0,
                current = self.fetch_generation,
                "Ignoring stale catalog fetch"
            );
            return false;
        }

        match result {
            Ok(records) => {
                info!(count = records.len(), "Catalog loaded");
                self.master = records;
                self.state = DiscoverState::Ready;
                self.apply_filters();
            }
            Err(e) => {
                error!(
                    error = %e,
                    status = ?e.status(),
                    decode = e.is_decode(),
                    "Failed to load catalog"
                );
                self.state = DiscoverState::Failed(e.to_string());
            }
        }

        true
    }

    /// Fetch from `source` and apply the result in one step
    pub async fn load<S: CatalogSource>(&mut self, source: &S, limit: u32) -> bool {
        let ticket = self.begin_fetch();
        let result = source.fetch_top_anime(limit).await;
        self.finish_fetch(ticket, result)
    }

    pub fn set_query(&mut self, query: &str) -> ListUpdate {
        self.query = query.to_string();
        self.apply_filters()
    }

    /// Select `genre` if it is not selected, otherwise deselect it.
    /// Returns whether the chip is selected afterwards.
    pub fn toggle_genre(&mut self, genre: &str) -> bool {
        let genre = genre.trim();
        let wanted = genre.to_lowercase();
        let before = self.selected_genres.len();
        self.selected_genres.retain(|g| g.to_lowercase() != wanted);

        let selected = self.selected_genres.len() == before;
        if selected {
            self.selected_genres.push(genre.to_string());
        }

        self.apply_filters();
        selected
    }

    pub fn clear_genres(&mut self) -> ListUpdate {
        self.selected_genres.clear();
        self.apply_filters()
    }

    /// Flip the favorite state of the catalog entry `id`.
    ///
    /// Returns the new state, or None when `id` is not in the catalog.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let record = self.master.iter().find(|r| r.id == id)?;

        let now_favorite = !self.favorites.contains(&record.id);
        if now_favorite {
            self.favorites.add(&record.id);
            info!(id = %record.id, title = %record.title, "Added to favorites");
        } else {
            self.favorites.remove(&record.id);
            info!(id = %record.id, title = %record.title, "Removed from favorites");
        }

        self.apply_filters();
        Some(now_favorite)
    }

    /// Re-apply the current filters, picking up favorite changes made elsewhere
    pub fn resume(&mut self) -> ListUpdate {
        debug!("Discover resumed, refreshing filters");
        self.apply_filters()
    }

    /// My List over an independent copy of the current catalog
    pub fn open_my_list(&self) -> MyListScreen {
        MyListScreen::open(self.master.clone(), self.favorites.clone())
    }

    fn apply_filters(&mut self) -> ListUpdate {
        let filter = Filter::new(&self.query, &self.selected_genres);
        let rows = AnimeRow::resolve_all(filter.apply(&self.master), &self.favorites);
        let update = self.list.submit(rows);

        debug!(
            shown = self.list.len(),
            total = self.master.len(),
            inserted = update.inserted,
            removed = update.removed,
            changed = update.changed,
            "Filters applied"
        );
        update
    }

    pub fn state(&self) -> &DiscoverState {
        &self.state
    }

    pub fn rows(&self) -> &BindableList<AnimeRow> {
        &self.list
    }

    pub fn master(&self) -> &[AnimeRecord] {
        &self.master
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected_genres(&self) -> &[String] {
        &self.selected_genres
    }

    pub fn is_genre_selected(&self, genre: &str) -> bool {
        let genre = genre.to_lowercase();
        self.selected_genres.iter().any(|g| g.to_lowercase() == genre)
    }

    /// Genre chips offered for the current catalog
    pub fn available_genres(&self) -> Vec<String> {
        available_genres(&self.master)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::record;

    struct StaticSource(&'static str);

    impl CatalogSource for StaticSource {
        async fn fetch_top_anime(&self, _limit: u32) -> Result<Vec<AnimeRecord>, FetchError> {
            jikan_client::decode_top_anime(self.0)
        }
    }

    fn catalog() -> Vec<AnimeRecord> {
        vec![
            record("1", "Naruto", &["Action", "Adventure"]),
            record("2", "Bleach", &["Action"]),
        ]
    }

    fn ready_screen(favorites: &FavoritesStore) -> DiscoverScreen {
        let mut screen = DiscoverScreen::new(favorites.clone());
        let ticket = screen.begin_fetch();
        assert!(screen.finish_fetch(ticket, Ok(catalog())));
        screen
    }

    fn shown_ids(screen: &DiscoverScreen) -> Vec<&str> {
        screen.rows().items().iter().map(|row| row.id()).collect()
    }

    fn decode_error() -> FetchError {
        serde_json::from_str::<u32>("{").unwrap_err().into()
    }

    #[test]
    fn test_starts_loading_and_empty() {
        let screen = DiscoverScreen::new(FavoritesStore::new());
        assert_eq!(screen.state(), &DiscoverState::Loading);
        assert!(screen.rows().is_empty());
    }

    #[test]
    fn test_successful_fetch_shows_everything() {
        let screen = ready_screen(&FavoritesStore::new());
        assert_eq!(screen.state(), &DiscoverState::Ready);
        assert_eq!(shown_ids(&screen), vec!["1", "2"]);
        assert_eq!(screen.available_genres(), vec!["Action", "Adventure"]);
    }

    #[test]
    fn test_fetch_resolves_existing_favorites() {
        let favorites = FavoritesStore::new();
        favorites.add("2");

        let screen = ready_screen(&favorites);
        let rows = screen.rows().items();
        assert!(!rows[0].is_favorite);
        assert!(rows[1].is_favorite);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_catalog() {
        let mut screen = ready_screen(&FavoritesStore::new());

        let ticket = screen.begin_fetch();
        assert!(screen.finish_fetch(ticket, Err(decode_error())));

        assert!(matches!(screen.state(), DiscoverState::Failed(_)));
        assert_eq!(screen.master().len(), 2);
        assert_eq!(shown_ids(&screen), vec!["1", "2"]);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut screen = DiscoverScreen::new(FavoritesStore::new());
        let old = screen.begin_fetch();
        let current = screen.begin_fetch();

        assert!(!screen.finish_fetch(old, Ok(catalog())));
        assert!(screen.master().is_empty());
        assert_eq!(screen.state(), &DiscoverState::Loading);

        assert!(screen.finish_fetch(current, Ok(catalog())));
        // A ticket is only good once
        assert!(!screen.finish_fetch(current, Ok(Vec::new())));
        assert_eq!(screen.master().len(), 2);
    }

    #[test]
    fn test_search_and_genre_filters() {
        let mut screen = ready_screen(&FavoritesStore::new());

        screen.set_query("naru");
        assert_eq!(shown_ids(&screen), vec!["1"]);

        screen.set_query("");
        assert!(screen.toggle_genre("adventure"));
        assert_eq!(shown_ids(&screen), vec!["1"]);
        assert!(screen.is_genre_selected("Adventure"));

        // Toggling the same chip with different case deselects it
        assert!(!screen.toggle_genre("ADVENTURE"));
        assert_eq!(shown_ids(&screen), vec!["1", "2"]);

        screen.toggle_genre("Action");
        screen.set_query("bleach");
        assert_eq!(shown_ids(&screen), vec!["2"]);

        screen.clear_genres();
        screen.set_query("");
        assert_eq!(shown_ids(&screen), vec!["1", "2"]);
    }

    #[test]
    fn test_toggle_favorite_twice_restores_state() {
        let favorites = FavoritesStore::new();
        let mut screen = ready_screen(&favorites);

        assert_eq!(screen.toggle_favorite("2"), Some(true));
        assert!(favorites.contains("2"));
        assert!(screen.rows().items()[1].is_favorite);

        assert_eq!(screen.toggle_favorite("2"), Some(false));
        assert!(!favorites.contains("2"));
        assert!(!screen.rows().items()[1].is_favorite);
    }

    #[test]
    fn test_toggle_unknown_id_changes_nothing() {
        let favorites = FavoritesStore::new();
        let mut screen = ready_screen(&favorites);

        assert_eq!(screen.toggle_favorite("404"), None);
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_rows_track_store_after_every_pass() {
        let favorites = FavoritesStore::new();
        let mut screen = ready_screen(&favorites);

        screen.toggle_favorite("1");
        screen.set_query("a");
        favorites.remove("1");
        favorites.add("2");
        screen.resume();

        for row in screen.rows().items() {
            assert_eq!(row.is_favorite, favorites.contains(row.id()));
        }
    }

    #[test]
    fn test_my_list_gets_independent_snapshot() {
        let favorites = FavoritesStore::new();
        let mut screen = ready_screen(&favorites);
        screen.toggle_favorite("2");

        let my_list = screen.open_my_list();

        let ticket = screen.begin_fetch();
        screen.finish_fetch(ticket, Ok(vec![record("3", "Gintama", &["Comedy"])]));

        assert_eq!(my_list.snapshot().len(), 2);
        assert_eq!(my_list.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let body = r#"{ "data": [
            { "mal_id": 20, "images": { "jpg": { "large_image_url": "n.jpg" } },
              "title": "Naruto", "genres": [{ "name": "Action" }] }
        ] }"#;

        let mut screen = DiscoverScreen::new(FavoritesStore::new());
        assert!(screen.load(&StaticSource(body), 25).await);
        assert_eq!(screen.state(), &DiscoverState::Ready);
        assert_eq!(shown_ids(&screen), vec!["20"]);
    }

    #[tokio::test]
    async fn test_malformed_json_on_first_load() {
        let mut screen = DiscoverScreen::new(FavoritesStore::new());
        assert!(screen.load(&StaticSource("{ not json"), 25).await);

        assert!(matches!(screen.state(), DiscoverState::Failed(_)));
        assert!(screen.master().is_empty());
        assert!(screen.rows().is_empty());
    }
}

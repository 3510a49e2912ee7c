//! Screen controllers.

pub mod discover;
pub mod my_list;

pub use discover::{DiscoverScreen, DiscoverState, FetchTicket};
pub use my_list::MyListScreen;

#[cfg(test)]
pub(crate) fn record(id: &str, title: &str, genres: &[&str]) -> shared::AnimeRecord {
    shared::AnimeRecord {
        id: id.to_string(),
        title: title.to_string(),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        description: format!("{} synopsis", title),
        image_url: format!("https://cdn.myanimelist.net/images/anime/{}l.jpg", id),
    }
}

//! Text rendering for the two screens.

use crate::screens::{DiscoverScreen, DiscoverState, MyListScreen};
use shared::AnimeRow;

const DESCRIPTION_WIDTH: usize = 120;

/// Shorten `text` to at most `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// One list entry: title with its action, genres, short description
pub fn render_row(position: usize, row: &AnimeRow) -> String {
    let record = &row.record;
    let mut lines = vec![format!(
        "{:>3}. {}  [{}]",
        position,
        record.title,
        row.action_label()
    )];
    if !record.genres.is_empty() {
        lines.push(format!("     {}", record.genre_line()));
    }
    lines.push(format!(
        "     {}",
        truncate(&record.description, DESCRIPTION_WIDTH)
    ));
    lines.join("\n")
}

/// Everything known about one entry
pub fn render_details(row: &AnimeRow) -> String {
    let record = &row.record;
    format!(
        "{}\n  MAL ID:   {}\n  Genres:   {}\n  Favorite: {}\n  Poster:   {}\n\n{}",
        record.title,
        record.id,
        if record.genres.is_empty() {
            "-".to_string()
        } else {
            record.genre_line()
        },
        if row.is_favorite { "yes" } else { "no" },
        record.image_url,
        record.description.trim()
    )
}

pub fn render_discover(screen: &DiscoverScreen) -> String {
    let mut out = vec!["== Discover ==   (mylist: open My List)".to_string()];

    match screen.state() {
        DiscoverState::Loading => out.push("Loading top anime...".to_string()),
        DiscoverState::Failed(message) => {
            out.push(format!("Could not load the catalog: {}", message));
            out.push("Type 'reload' to try again.".to_string());
        }
        DiscoverState::Ready => {}
    }

    if !screen.query().trim().is_empty() {
        out.push(format!("Search: \"{}\"", screen.query().trim()));
    }
    if !screen.selected_genres().is_empty() {
        out.push(format!("Genres: {}", screen.selected_genres().join(", ")));
    }

    let rows = screen.rows();
    if rows.is_empty() {
        if screen.state() == &DiscoverState::Ready {
            out.push("No anime match the current filters.".to_string());
        }
    } else {
        out.push(format!(
            "Showing {} of {}",
            rows.len(),
            screen.master().len()
        ));
        out.extend(rows.render(render_row));
    }

    out.join("\n")
}

pub fn render_my_list(screen: &MyListScreen) -> String {
    let mut out = vec!["== My List ==   (back: return to Discover)".to_string()];

    let rows = screen.rows();
    if rows.is_empty() {
        out.push("No favorites yet. Use 'fav <n>' on Discover to add some.".to_string());
    } else {
        out.extend(rows.render(render_row));
    }

    out.join("\n")
}

/// Genre chips, selected ones marked with '*'
pub fn render_genres(screen: &DiscoverScreen) -> String {
    let genres = screen.available_genres();
    if genres.is_empty() {
        return "No genres available yet.".to_string();
    }

    genres
        .iter()
        .map(|genre| {
            let mark = if screen.is_genre_selected(genre) { '*' } else { ' ' };
            format!("[{}] {}", mark, genre)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

//! Catalog filter engine.
//!
//! A record is shown when its title contains the search text and, if any
//! genres are selected, it carries at least one of them. Both tests ignore
//! case. Filtering never mutates its inputs and keeps the input order.

use crate::models::AnimeRecord;
use std::collections::HashSet;

/// Normalized search predicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Trimmed, lowercased search text
    query: String,
    /// Lowercased selected genre labels
    genres: HashSet<String>,
}

impl Filter {
    pub fn new<I, S>(query: &str, selected_genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            query: query.trim().to_lowercase(),
            genres: selected_genres
                .into_iter()
                .map(|g| g.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// True when neither predicate restricts anything
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.genres.is_empty()
    }

    pub fn matches_title(&self, record: &AnimeRecord) -> bool {
        self.query.is_empty() || record.title.to_lowercase().contains(&self.query)
    }

    /// Set membership on whole genre names, not substrings
    pub fn matches_genres(&self, record: &AnimeRecord) -> bool {
        self.genres.is_empty()
            || record
                .genres
                .iter()
                .any(|g| self.genres.contains(&g.to_lowercase()))
    }

    pub fn matches(&self, record: &AnimeRecord) -> bool {
        self.matches_title(record) && self.matches_genres(record)
    }

    /// Matching records, cloned, in input order
    pub fn apply(&self, records: &[AnimeRecord]) -> Vec<AnimeRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Filter `records` by title `query` and `selected_genres`
pub fn filter<I, S>(records: &[AnimeRecord], query: &str, selected_genres: I) -> Vec<AnimeRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Filter::new(query, selected_genres).apply(records)
}

/// Distinct genre labels across `records`, in first-seen order.
///
/// Labels differing only in case are reported once, using the first spelling.
pub fn available_genres(records: &[AnimeRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut genres = Vec::new();

    for genre in records.iter().flat_map(|r| r.genres.iter()) {
        if seen.insert(genre.to_lowercase()) {
            genres.push(genre.clone());
        }
    }

    genres
}

//! A list bound to a display.
//!
//! Screens hand the list a freshly built sequence on every change; the list
//! keeps it and reports what changed, keyed by item identity.

use shared::AnimeRow;
use std::collections::{HashMap, HashSet};

/// Stable identity used to match items across submissions
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for AnimeRow {
    fn key(&self) -> &str {
        self.id()
    }
}

/// Changes between two submissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListUpdate {
    pub inserted: usize,
    pub removed: usize,
    /// Same key, different contents
    pub changed: usize,
}

impl ListUpdate {
    pub fn is_empty(&self) -> bool {
        self.inserted == 0 && self.removed == 0 && self.changed == 0
    }
}

#[derive(Debug, Clone)]
pub struct BindableList<T> {
    items: Vec<T>,
}

impl<T> Default for BindableList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Keyed + PartialEq> BindableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bound items with `items`
    pub fn submit(&mut self, items: Vec<T>) -> ListUpdate {
        let update = {
            let previous: HashMap<&str, &T> =
                self.items.iter().map(|item| (item.key(), item)).collect();
            let next: HashSet<&str> = items.iter().map(Keyed::key).collect();

            let mut update = ListUpdate::default();
            for item in &items {
                match previous.get(item.key()) {
                    None => update.inserted += 1,
                    Some(old) if *old != item => update.changed += 1,
                    Some(_) => {}
                }
            }
            update.removed = previous.keys().filter(|key| !next.contains(*key)).count();
            update
        };

        self.items = items;
        update
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Item at a 1-based display position
    pub fn at_position(&self, position: usize) -> Option<&T> {
        position.checked_sub(1).and_then(|index| self.items.get(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render every item through `render`, which receives the 1-based position
    pub fn render<F>(&self, mut render: F) -> Vec<String>
    where
        F: FnMut(usize, &T) -> String,
    {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| render(index + 1, item))
            .collect()
    }
}

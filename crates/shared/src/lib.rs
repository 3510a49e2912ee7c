//! Shared library for the anime catalog browser.
//!
//! This crate provides the pieces every other crate builds on:
//! - Configuration management
//! - Logging infrastructure
//! - The catalog record model
//! - The in-memory favorites store
//! - The catalog filter engine

pub mod config;
pub mod favorites;
pub mod filter;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use favorites::FavoritesStore;
pub use filter::{available_genres, filter, Filter};
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;

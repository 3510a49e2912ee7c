//! Jikan API v4 client implementation.
//!
//! This module provides the HTTP client and the response types for the
//! Jikan API (MyAnimeList unofficial API).

pub mod client;
pub mod types;

pub use client::JikanClient;
pub use types::*;

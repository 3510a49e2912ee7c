//! Jikan API v4 response types.
//!
//! Only the fields the catalog consumes are modelled; serde ignores the
//! rest of each entry.

use serde::{Deserialize, Serialize};

/// Top anime response (`GET /top/anime`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAnimeResponse {
    pub data: Vec<TopAnimeEntry>,
}

/// Top anime entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAnimeEntry {
    pub mal_id: u32,
    pub images: AnimeImages,
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(default)]
    pub synopsis: Option<String>,
    pub genres: Vec<MalEntity>,
}

/// Anime images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimeImages {
    pub jpg: ImageSet,
    #[serde(default)]
    pub webp: Option<ImageSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub large_image_url: Option<String>,
}

/// MAL entity (genre, studio, producer, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalEntity {
    #[serde(default)]
    pub mal_id: Option<u32>,
    pub name: String,
}

/// Error response from Jikan API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JikanError {
    pub status: u16,
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

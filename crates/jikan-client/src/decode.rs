//! Conversion of Jikan responses into catalog records.

use crate::api::{TopAnimeEntry, TopAnimeResponse};
use crate::error::FetchError;
use shared::AnimeRecord;

/// Description used when an entry has no synopsis
pub const NO_DESCRIPTION: &str = "No description available.";

/// Decode a `/top/anime` body. Any bad entry rejects the whole batch.
pub fn decode_top_anime(body: &str) -> Result<Vec<AnimeRecord>, FetchError> {
    let response: TopAnimeResponse = serde_json::from_str(body)?;
    response
        .data
        .into_iter()
        .map(AnimeRecord::try_from)
        .collect()
}

impl TryFrom<TopAnimeEntry> for AnimeRecord {
    type Error = FetchError;

    fn try_from(entry: TopAnimeEntry) -> Result<Self, Self::Error> {
        let image_url = entry
            .images
            .jpg
            .large_image_url
            .ok_or(FetchError::MissingImage {
                mal_id: entry.mal_id,
            })?;

        // English title only when it carries text
        let title = entry
            .title_english
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(entry.title);

        Ok(AnimeRecord {
            id: entry.mal_id.to_string(),
            title,
            genres: entry.genres.into_iter().map(|g| g.name).collect(),
            description: entry
                .synopsis
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP_ANIME: &str = r#"{
        "pagination": { "last_visible_page": 1, "has_next_page": false },
        "data": [
            {
                "mal_id": 5114,
                "url": "https://myanimelist.net/anime/5114",
                "images": {
                    "jpg": {
                        "image_url": "https://cdn.myanimelist.net/images/anime/1208/94745.jpg",
                        "large_image_url": "https://cdn.myanimelist.net/images/anime/1208/94745l.jpg"
                    }
                },
                "title": "Hagane no Renkinjutsushi: Fullmetal Alchemist",
                "title_english": "Fullmetal Alchemist: Brotherhood",
                "synopsis": "After a horrific alchemy experiment goes wrong...",
                "score": 9.1,
                "genres": [
                    { "mal_id": 1, "type": "anime", "name": "Action", "url": "" },
                    { "mal_id": 2, "type": "anime", "name": "Adventure", "url": "" },
                    { "mal_id": 8, "type": "anime", "name": "Drama", "url": "" }
                ]
            },
            {
                "mal_id": 9253,
                "images": { "jpg": { "large_image_url": "https://cdn.myanimelist.net/images/anime/1935/127974l.jpg" } },
                "title": "Steins;Gate",
                "title_english": null,
                "synopsis": null,
                "genres": []
            },
            {
                "mal_id": 28977,
                "images": { "jpg": { "large_image_url": "https://cdn.myanimelist.net/images/anime/3/72078l.jpg" } },
                "title": "Gintama°",
                "title_english": "",
                "genres": [{ "name": "Comedy" }]
            }
        ]
    }"#;

    #[test]
    fn test_decode_top_anime() {
        let records = decode_top_anime(TOP_ANIME).unwrap();
        assert_eq!(records.len(), 3);

        let fma = &records[0];
        assert_eq!(fma.id, "5114");
        assert_eq!(fma.title, "Fullmetal Alchemist: Brotherhood");
        assert_eq!(fma.genres, vec!["Action", "Adventure", "Drama"]);
        assert_eq!(fma.description, "After a horrific alchemy experiment goes wrong...");
        assert_eq!(
            fma.image_url,
            "https://cdn.myanimelist.net/images/anime/1208/94745l.jpg"
        );
    }

    #[test]
    fn test_title_and_synopsis_fallbacks() {
        let records = decode_top_anime(TOP_ANIME).unwrap();

        // null english title and null synopsis
        assert_eq!(records[1].title, "Steins;Gate");
        assert_eq!(records[1].description, NO_DESCRIPTION);
        assert!(records[1].genres.is_empty());

        // empty english title, absent synopsis
        assert_eq!(records[2].title, "Gintama°");
        assert_eq!(records[2].description, NO_DESCRIPTION);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = decode_top_anime("{ \"data\": [ { \"mal_id\": ").unwrap_err();
        assert!(err.is_decode());

        let err = decode_top_anime(r#"{ "items": [] }"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_one_bad_entry_rejects_batch() {
        let body = r#"{ "data": [
            { "mal_id": 1, "images": { "jpg": { "large_image_url": "a.jpg" } }, "title": "Ok", "genres": [] },
            { "mal_id": 2, "images": { "jpg": { "image_url": "b.jpg" } }, "title": "No poster", "genres": [] }
        ] }"#;

        match decode_top_anime(body) {
            Err(FetchError::MissingImage { mal_id }) => assert_eq!(mal_id, 2),
            other => panic!("expected MissingImage, got {:?}", other),
        }

        let body = r#"{ "data": [
            { "mal_id": 1, "images": { "jpg": { "large_image_url": "a.jpg" } }, "title": "Ok", "genres": [] },
            { "mal_id": 3, "images": { "jpg": { "large_image_url": "c.jpg" } }, "title": "No genres" }
        ] }"#;
        assert!(decode_top_anime(body).unwrap_err().is_decode());
    }

    #[test]
    fn test_empty_listing() {
        assert!(decode_top_anime(r#"{ "data": [] }"#).unwrap().is_empty());
    }
}

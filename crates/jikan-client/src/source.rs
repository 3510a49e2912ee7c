//! The seam between screens and the network.

use crate::api::JikanClient;
use crate::error::FetchError;
use shared::AnimeRecord;
use std::future::Future;

/// Anything that can produce the top anime listing.
///
/// Implemented by [`JikanClient`]; tests substitute canned sources.
pub trait CatalogSource: Send + Sync {
    fn fetch_top_anime(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, FetchError>> + Send;
}

impl CatalogSource for JikanClient {
    fn fetch_top_anime(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, FetchError>> + Send {
        JikanClient::fetch_top_anime(self, limit)
    }
}

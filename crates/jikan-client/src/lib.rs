//! Catalog fetcher for the Jikan API v4.
//!
//! Issues a single request for the top anime listing and decodes it into
//! [`shared::AnimeRecord`]s. A response that fails to decode is rejected as
//! a whole; callers never see a partial list.

pub mod api;
pub mod decode;
pub mod error;
pub mod source;

pub use api::JikanClient;
pub use decode::{decode_top_anime, NO_DESCRIPTION};
pub use error::FetchError;
pub use source::CatalogSource;

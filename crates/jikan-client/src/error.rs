//! Catalog fetch errors.

use thiserror::Error;

/// Why a catalog fetch produced no records
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never completed (DNS, connection, timeout, body read)
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the expected JSON structure
    #[error("failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An entry lacked the poster image URL
    #[error("entry {mal_id} has no large image url")]
    MissingImage { mal_id: u32 },
}

impl FetchError {
    /// True for failures caused by the response body rather than the transport
    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_) | FetchError::MissingImage { .. })
    }

    /// HTTP status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

//! Jikan API client.

use super::types::JikanError;
use crate::decode::decode_top_anime;
use crate::error::FetchError;
use anyhow::{Context, Result};
use reqwest::Client;
use shared::config::JikanConfig;
use shared::AnimeRecord;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Jikan API v4 client
#[derive(Debug, Clone)]
pub struct JikanClient {
    /// HTTP client
    client: Client,
    /// Base URL for Jikan API
    base_url: String,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(config: &JikanConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the top anime listing for `limit` entries
    pub fn top_anime_url(&self, limit: u32) -> String {
        format!("{}/top/anime?limit={}", self.base_url, limit)
    }

    /// Make a single GET request and return the body text.
    ///
    /// Non-success statuses are reported with the server's message when the
    /// body is a Jikan error object, otherwise with the raw body text.
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Making API request");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Request error");
            FetchError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<JikanError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);

            warn!(
                url = %url,
                status = %status,
                error = %message,
                "Request failed"
            );

            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!(url = %url, bytes = body.len(), "Request successful");
        Ok(body)
    }

    /// Fetch the top anime listing, decoded into catalog records
    pub async fn fetch_top_anime(&self, limit: u32) -> Result<Vec<AnimeRecord>, FetchError> {
        info!(limit = limit, "Fetching top anime");

        let url = self.top_anime_url(limit);
        let body = self.get_text(&url).await?;

        let records = decode_top_anime(&body).map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse response");
            e
        })?;

        info!(count = records.len(), "Fetched top anime");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer one request on a local port with `status` and `body`; returns the base URL
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> JikanClient {
        JikanClient::new(&JikanConfig {
            base_url,
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = JikanClient::new(&JikanConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_top_anime_url() {
        let config = JikanConfig {
            base_url: "https://api.jikan.moe/v4/".to_string(),
            ..Default::default()
        };
        let client = JikanClient::new(&config).unwrap();

        assert_eq!(client.base_url(), "https://api.jikan.moe/v4");
        assert_eq!(
            client.top_anime_url(25),
            "https://api.jikan.moe/v4/top/anime?limit=25"
        );
    }

    #[tokio::test]
    async fn test_error_status_carries_code_and_message() {
        let base_url = serve_once(
            "503 Service Unavailable",
            r#"{"status":503,"type":"UpstreamException","message":"down"}"#,
        )
        .await;

        let err = client_for(base_url).fetch_top_anime(25).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(!err.is_decode());
        match err {
            FetchError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down");
            }
            other => panic!("expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body() {
        let base_url = serve_once("502 Bad Gateway", "<html>Bad Gateway</html>").await;

        let err = client_for(base_url).fetch_top_anime(25).await.unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert_eq!(
            err.to_string(),
            "request failed with status 502: <html>Bad Gateway</html>"
        );
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let base_url = serve_once("200 OK", "{ bad").await;

        let err = client_for(base_url).fetch_top_anime(25).await.unwrap_err();
        assert!(err.is_decode());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_success_body_is_decoded() {
        let base_url = serve_once(
            "200 OK",
            r#"{ "data": [ { "mal_id": 20,
                "images": { "jpg": { "large_image_url": "https://cdn.myanimelist.net/images/anime/13/17405l.jpg" } },
                "title": "Naruto", "synopsis": "Ninja.", "genres": [{ "name": "Action" }] } ] }"#,
        )
        .await;

        let records = client_for(base_url).fetch_top_anime(1).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "20");
        assert_eq!(records[0].genres, vec!["Action"]);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = JikanConfig {
            // Port 9 on localhost is not expected to accept HTTP connections
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let client = JikanClient::new(&config).unwrap();

        let err = client.fetch_top_anime(1).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(!err.is_decode());
    }
}

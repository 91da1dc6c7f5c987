//! Realtime feed HTTP client.
//!
//! Fetches the raw protobuf bytes with a bounded request timeout. A
//! timeout is reported like any other transport failure so the caller
//! can fall back to the error image.

use std::time::Duration;

use tracing::debug;

use crate::domain::RawStopUpdate;

use super::decode::{decode_feed, stop_updates};
use super::error::FeedError;
use super::source::FeedSource;

/// Default feed URL: MTA subway feed for the A, C and E lines.
const DEFAULT_FEED_URL: &str =
    "https://api-endpoint.mta.info/Dataservice/mtagtfsfeeds/nyct%2Fgtfs-ace";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Largest response body accepted by default (16 MiB).
const MAX_FEED_BYTES: u64 = 16 * 1024 * 1024;

/// Bytes of an error response read for its message.
const MAX_ERROR_BYTES: usize = 4096;

/// Characters of an error response kept in [`FeedError::Status`].
const MAX_ERROR_CHARS: usize = 200;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// URL of the GTFS-realtime feed
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Largest response body accepted, in bytes
    pub max_bytes: u64,
}

impl FeedConfig {
    /// Create a config for the given feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_bytes: MAX_FEED_BYTES,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the response size limit.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

/// GTFS-realtime feed client.
///
/// Each call performs one GET; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
    timeout_secs: u64,
    max_bytes: u64,
}

impl FeedClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
            timeout_secs: config.timeout_secs,
            max_bytes: config.max_bytes,
        })
    }

    /// The URL this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw feed bytes.
    ///
    /// The body is read chunk by chunk and abandoned as soon as it passes
    /// the size limit.
    pub async fn fetch(&self) -> Result<Vec<u8>, FeedError> {
        let mut response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::transport(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(&mut response).await;
            return Err(FeedError::Status {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(size) = response.content_length() {
            if size > self.max_bytes {
                return Err(FeedError::TooLarge {
                    size,
                    max: self.max_bytes,
                });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FeedError::transport(e, self.timeout_secs))?
        {
            let size = (body.len() + chunk.len()) as u64;
            if size > self.max_bytes {
                return Err(FeedError::TooLarge {
                    size,
                    max: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(bytes = body.len(), url = %self.url, "fetched feed");
        Ok(body)
    }
}

/// Start of an error response body, for the error message.
///
/// Reads at most [`MAX_ERROR_BYTES`]; a body that fails midway keeps
/// whatever arrived.
async fn error_message(response: &mut reqwest::Response) -> String {
    let mut body = Vec::new();
    while body.len() < MAX_ERROR_BYTES {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) | Err(_) => break,
        }
    }
    body.truncate(MAX_ERROR_BYTES);
    String::from_utf8_lossy(&body)
        .chars()
        .take(MAX_ERROR_CHARS)
        .collect()
}

impl FeedSource for FeedClient {
    async fn fetch_updates(&self) -> Result<Vec<RawStopUpdate>, FeedError> {
        let bytes = self.fetch().await?;
        let feed = decode_feed(&bytes)?;
        Ok(stop_updates(&feed))
    }
}

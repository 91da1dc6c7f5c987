//! Feed error types.

/// Errors from fetching or decoding the realtime feed.
///
/// All variants mean the same thing to the display: no data this time.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (connection refused, DNS, TLS, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout
    #[error("feed request timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The feed returned a non-success status
    #[error("feed returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body exceeded the size limit
    #[error("feed response too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },

    /// The body is not a valid GTFS-realtime message
    #[error("could not decode feed: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl FeedError {
    /// Classify a reqwest error, separating timeouts from other failures.
    pub(crate) fn transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            FeedError::Timeout { secs: timeout_secs }
        } else {
            FeedError::Http(err)
        }
    }
}

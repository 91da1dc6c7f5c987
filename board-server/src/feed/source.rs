//! Feed source abstraction.
//!
//! The web layer only needs "give me the current stop updates". Keeping
//! that behind a trait lets the handlers run against canned data in tests
//! and in offline development.

use std::future::Future;

use crate::domain::RawStopUpdate;

use super::error::FeedError;

/// Something that can produce the current stop-time rows.
pub trait FeedSource: Send + Sync + 'static {
    /// Fetch and decode the feed, returning its rows in feed order.
    fn fetch_updates(&self) -> impl Future<Output = Result<Vec<RawStopUpdate>, FeedError>> + Send;
}

/// Feed source that serves fixed rows, or fails with a fixed status.
///
/// Useful for development and testing without network access.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    response: Result<Vec<RawStopUpdate>, (u16, String)>,
}

impl StaticFeed {
    /// Serve these rows on every request.
    pub fn new(updates: Vec<RawStopUpdate>) -> Self {
        Self {
            response: Ok(updates),
        }
    }

    /// Fail every request as if the feed returned `status`.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self {
            response: Err((status, message.into())),
        }
    }
}

impl FeedSource for StaticFeed {
    async fn fetch_updates(&self) -> Result<Vec<RawStopUpdate>, FeedError> {
        match &self.response {
            Ok(updates) => Ok(updates.clone()),
            Err((status, message)) => Err(FeedError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

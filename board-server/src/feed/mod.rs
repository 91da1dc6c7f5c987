//! Realtime feed access.
//!
//! This module fetches the GTFS-realtime protobuf feed over HTTP and
//! flattens its trip updates into [`RawStopUpdate`](crate::domain::RawStopUpdate)
//! rows for the normalizer.
//!
//! Key characteristics of the feed:
//! - One feed covers many lines and stations; most rows are irrelevant
//!   to any single station
//! - Times are absolute POSIX timestamps, so no date inference is needed
//! - Fields are optional throughout and are routinely omitted

mod client;
mod decode;
mod error;
mod source;

pub use client::{FeedClient, FeedConfig};
pub use decode::{decode_feed, stop_updates};
pub use error::FeedError;
pub use source::{FeedSource, StaticFeed};

//! E-ink departure board server.
//!
//! Fetches GTFS-realtime trip updates, keeps the next departures from one
//! station in each configured direction, and draws them as a grayscale PNG
//! sized for an e-reader browser.

pub mod config;
pub mod domain;
pub mod feed;
pub mod normalize;
pub mod render;
pub mod web;

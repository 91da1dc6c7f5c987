//! Domain types for the departure board.
//!
//! This module contains the station configuration, the raw rows pulled
//! out of the realtime feed, and the normalized departures that the
//! renderer consumes. Configuration types enforce their invariants at
//! construction time.

mod departure;
mod direction;
mod error;
mod station;

pub use departure::{Departure, DepartureBoard, RawStopUpdate};
pub use direction::{DirectionCode, InvalidDirection};
pub use error::ConfigError;
pub use station::StationConfig;

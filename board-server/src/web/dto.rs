//! Data transfer objects for web responses.

use chrono::{DateTime, SecondsFormat};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::{Departure, DepartureBoard, DirectionCode, StationConfig};

/// The departure board as JSON.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Station ID prefix (e.g., "A46")
    pub station_id: String,

    /// When the board was computed (RFC 3339, station time zone)
    pub generated_at: String,

    /// One entry per configured direction, in display order
    pub directions: Vec<DirectionResult>,
}

/// Departures in one direction.
#[derive(Debug, Serialize)]
pub struct DirectionResult {
    /// Direction code (e.g., "N")
    pub code: DirectionCode,

    /// Human-readable label (e.g., "Manhattan-bound")
    pub label: String,

    pub departures: Vec<DepartureResult>,
}

/// A single departure.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// Route (e.g., "A")
    pub route_id: String,

    /// Predicted departure (RFC 3339, station time zone)
    pub predicted_time: String,

    /// Whole minutes until departure, rounded down
    pub minutes_away: i64,
}

impl BoardResponse {
    /// Build the response, ordering directions as configured.
    pub fn from_board(board: &DepartureBoard, station: &StationConfig, now: &DateTime<Tz>) -> Self {
        let directions = station
            .directions()
            .iter()
            .map(|(code, label)| DirectionResult {
                code: *code,
                label: label.clone(),
                departures: board
                    .get(*code)
                    .iter()
                    .map(|d| DepartureResult::from_departure(d, now))
                    .collect(),
            })
            .collect();

        Self {
            station_id: station.station_id().to_string(),
            generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, false),
            directions,
        }
    }
}

impl DepartureResult {
    pub fn from_departure(departure: &Departure, now: &DateTime<Tz>) -> Self {
        Self {
            route_id: departure.route_id.clone(),
            predicted_time: departure
                .predicted_time
                .to_rfc3339_opts(SecondsFormat::Secs, false),
            minutes_away: departure.time_until(now).num_minutes(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

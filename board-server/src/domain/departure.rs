//! Feed rows and normalized departures.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use super::DirectionCode;

/// One stop-time row flattened out of a decoded feed.
///
/// The feed omits fields freely, so both times are optional. Rows are
/// validated by the normalizer, never here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawStopUpdate {
    pub route_id: String,
    pub stop_id: String,
    /// Predicted departure, seconds since the Unix epoch.
    pub departure_time: Option<i64>,
    /// Predicted arrival, seconds since the Unix epoch.
    pub arrival_time: Option<i64>,
}

impl RawStopUpdate {
    /// Create a row with only a departure time.
    pub fn departing(route_id: impl Into<String>, stop_id: impl Into<String>, at: i64) -> Self {
        Self {
            route_id: route_id.into(),
            stop_id: stop_id.into(),
            departure_time: Some(at),
            arrival_time: None,
        }
    }

    /// The time to show for this row: departure if known, else arrival.
    pub fn predicted_epoch_seconds(&self) -> Option<i64> {
        self.departure_time.or(self.arrival_time)
    }
}

/// A departure that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub route_id: String,
    pub direction: DirectionCode,
    /// Predicted departure in the station's time zone.
    pub predicted_time: DateTime<Tz>,
}

impl Departure {
    /// Time remaining until departure, relative to `now`.
    pub fn time_until(&self, now: &DateTime<Tz>) -> Duration {
        self.predicted_time.signed_duration_since(now)
    }
}

/// Upcoming departures grouped by direction.
///
/// Every configured direction has an entry, possibly empty. Each list is
/// sorted by predicted time and bounded by the configured maximum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartureBoard {
    entries: BTreeMap<DirectionCode, Vec<Departure>>,
}

impl DepartureBoard {
    /// Create a board with an empty list for each direction.
    pub fn with_directions(directions: impl IntoIterator<Item = DirectionCode>) -> Self {
        Self {
            entries: directions.into_iter().map(|d| (d, Vec::new())).collect(),
        }
    }

    /// Replace the list for a direction.
    pub fn insert(&mut self, direction: DirectionCode, departures: Vec<Departure>) {
        self.entries.insert(direction, departures);
    }

    /// Departures for a direction; empty if none are known.
    pub fn get(&self, direction: DirectionCode) -> &[Departure] {
        self.entries
            .get(&direction)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the board has an entry (possibly empty) for `direction`.
    pub fn contains(&self, direction: DirectionCode) -> bool {
        self.entries.contains_key(&direction)
    }

    /// Directions present on the board, in code order.
    pub fn directions(&self) -> impl Iterator<Item = DirectionCode> + '_ {
        self.entries.keys().copied()
    }

    /// Iterate over `(direction, departures)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (DirectionCode, &[Departure])> {
        self.entries.iter().map(|(d, v)| (*d, v.as_slice()))
    }

    /// Total number of departures across all directions.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

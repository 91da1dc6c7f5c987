//! Station configuration.

use std::collections::BTreeSet;

use chrono::Duration;
use chrono_tz::Tz;

use super::{ConfigError, DirectionCode};

/// Immutable description of the station whose departures are shown.
///
/// Built once at startup and shared by every request. All fields are
/// validated by [`StationConfig::new`].
///
/// # Examples
///
/// ```
/// use board_server::domain::{DirectionCode, StationConfig};
/// use chrono::Duration;
///
/// let config = StationConfig::new(
///     "A46",
///     ["A", "C"],
///     vec![
///         (DirectionCode::parse("N").unwrap(), "Manhattan-bound".to_string()),
///         (DirectionCode::parse("S").unwrap(), "Brooklyn-bound".to_string()),
///     ],
///     3,
///     Duration::zero(),
///     chrono_tz::America::New_York,
/// )
/// .unwrap();
///
/// assert!(config.accepts_route("A"));
/// assert!(!config.accepts_route("E"));
/// ```
#[derive(Debug, Clone)]
pub struct StationConfig {
    station_id: String,
    route_filter: BTreeSet<String>,
    directions: Vec<(DirectionCode, String)>,
    max_results_per_direction: usize,
    min_lead_time: Duration,
    time_zone: Tz,
}

impl StationConfig {
    /// Create a validated station configuration.
    ///
    /// `directions` keeps its order; it decides the column order on the board.
    pub fn new<R, S>(
        station_id: impl Into<String>,
        routes: R,
        directions: Vec<(DirectionCode, String)>,
        max_results_per_direction: usize,
        min_lead_time: Duration,
        time_zone: Tz,
    ) -> Result<Self, ConfigError>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let station_id = station_id.into();
        if station_id.is_empty() {
            return Err(ConfigError::EmptyStationId);
        }

        let route_filter: BTreeSet<String> = routes.into_iter().map(Into::into).collect();
        if route_filter.is_empty() {
            return Err(ConfigError::EmptyRouteFilter);
        }

        if directions.is_empty() {
            return Err(ConfigError::NoDirections);
        }
        let mut seen = BTreeSet::new();
        for (code, _) in &directions {
            if !seen.insert(*code) {
                return Err(ConfigError::DuplicateDirection(code.as_char()));
            }
        }

        if max_results_per_direction == 0 {
            return Err(ConfigError::ZeroMaxResults);
        }
        if min_lead_time < Duration::zero() {
            return Err(ConfigError::NegativeLeadTime);
        }

        Ok(Self {
            station_id,
            route_filter,
            directions,
            max_results_per_direction,
            min_lead_time,
            time_zone,
        })
    }

    /// Prefix shared by every platform of the station (e.g. `A46`).
    pub fn station_id(&self) -> &str {
        &self.station_id
    }

    /// Whether departures on `route_id` should be shown.
    pub fn accepts_route(&self, route_id: &str) -> bool {
        self.route_filter.contains(route_id)
    }

    /// Accepted routes, sorted.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.route_filter.iter().map(String::as_str)
    }

    /// Configured directions with their labels, in display order.
    pub fn directions(&self) -> &[(DirectionCode, String)] {
        &self.directions
    }

    /// Returns the label for a direction, if configured.
    pub fn direction_label(&self, code: DirectionCode) -> Option<&str> {
        self.directions
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| label.as_str())
    }

    /// Whether `code` is one of the configured directions.
    pub fn has_direction(&self, code: DirectionCode) -> bool {
        self.directions.iter().any(|(c, _)| *c == code)
    }

    /// Direction of a stop identifier belonging to this station.
    ///
    /// The stop must start with the station ID, and its last character
    /// must be a configured direction code.
    pub fn direction_of_stop(&self, stop_id: &str) -> Option<DirectionCode> {
        if !stop_id.starts_with(self.station_id.as_str()) {
            return None;
        }
        let code = DirectionCode::from_char(stop_id.chars().next_back()?).ok()?;
        self.has_direction(code).then_some(code)
    }

    pub fn max_results_per_direction(&self) -> usize {
        self.max_results_per_direction
    }

    pub fn min_lead_time(&self) -> Duration {
        self.min_lead_time
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }
}

//! Departure selection.
//!
//! Turns the flat list of stop-time rows from the realtime feed into a
//! [`DepartureBoard`] for one station: rows for other routes, other
//! stations and unknown directions are dropped, times are interpreted in
//! the station's time zone, departures closer than the minimum lead time
//! are discarded, and each direction keeps only its earliest departures.
//!
//! A realtime feed routinely contains rows that are irrelevant or
//! malformed from the point of view of a single station, so nothing here
//! fails: bad rows are counted and skipped.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

use crate::domain::{Departure, DepartureBoard, DirectionCode, RawStopUpdate, StationConfig};

/// Why a row was left off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// Route not in the filter
    Route,
    /// Stop belongs to another station or an unknown direction
    Stop,
    /// Neither departure nor arrival time present
    MissingTime,
    /// Epoch seconds outside the representable range
    InvalidTime,
    /// Departs before `now + min_lead_time`
    TooSoon,
}

#[derive(Debug, Default)]
struct RejectionCounts {
    route: usize,
    stop: usize,
    missing_time: usize,
    invalid_time: usize,
    too_soon: usize,
}

impl RejectionCounts {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Route => self.route += 1,
            Rejection::Stop => self.stop += 1,
            Rejection::MissingTime => self.missing_time += 1,
            Rejection::InvalidTime => self.invalid_time += 1,
            Rejection::TooSoon => self.too_soon += 1,
        }
    }
}

/// Build the departure board for `config`'s station.
///
/// Rows are considered in feed order. The result has one entry per
/// configured direction; each entry is sorted by predicted time (ties keep
/// feed order) and holds at most `max_results_per_direction` departures.
///
/// This is a pure function of its inputs: the same rows and the same `now`
/// always give the same board.
pub fn normalize(
    updates: &[RawStopUpdate],
    config: &StationConfig,
    now: &DateTime<Tz>,
) -> DepartureBoard {
    let tz = config.time_zone();
    let now = now.with_timezone(&tz);

    let mut groups: BTreeMap<DirectionCode, Vec<Departure>> = BTreeMap::new();
    let mut rejected = RejectionCounts::default();

    for update in updates {
        match select(update, config, tz, &now) {
            Ok(departure) => groups.entry(departure.direction).or_default().push(departure),
            Err(rejection) => rejected.record(rejection),
        }
    }

    let mut board =
        DepartureBoard::with_directions(config.directions().iter().map(|(code, _)| *code));
    let mut kept = 0;

    for (direction, mut departures) in groups {
        // `sort_by` is stable, so equal instants keep their feed order.
        departures.sort_by(|a, b| a.predicted_time.cmp(&b.predicted_time));
        departures.truncate(config.max_results_per_direction());
        kept += departures.len();
        board.insert(direction, departures);
    }

    debug!(
        rows = updates.len(),
        kept,
        wrong_route = rejected.route,
        wrong_stop = rejected.stop,
        missing_time = rejected.missing_time,
        invalid_time = rejected.invalid_time,
        too_soon = rejected.too_soon,
        "normalized feed"
    );

    board
}

/// Apply the per-row filters in order: route, stop, time, lead time.
fn select(
    update: &RawStopUpdate,
    config: &StationConfig,
    tz: Tz,
    now: &DateTime<Tz>,
) -> Result<Departure, Rejection> {
    if !config.accepts_route(&update.route_id) {
        return Err(Rejection::Route);
    }

    let direction = config
        .direction_of_stop(&update.stop_id)
        .ok_or(Rejection::Stop)?;

    let epoch = update
        .predicted_epoch_seconds()
        .ok_or(Rejection::MissingTime)?;
    let predicted_time = tz
        .timestamp_opt(epoch, 0)
        .single()
        .ok_or(Rejection::InvalidTime)?;

    if predicted_time.signed_duration_since(now) < config.min_lead_time() {
        return Err(Rejection::TooSoon);
    }

    Ok(Departure {
        route_id: update.route_id.clone(),
        direction,
        predicted_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const NOW: i64 = 1_760_000_000;

    fn dir(s: &str) -> DirectionCode {
        DirectionCode::parse(s).unwrap()
    }

    fn config(max_results: usize, min_lead: Duration) -> StationConfig {
        StationConfig::new(
            "A46",
            ["A", "C"],
            vec![
                (dir("N"), "Manhattan-bound".to_string()),
                (dir("S"), "Brooklyn-bound".to_string()),
            ],
            max_results,
            min_lead,
            chrono_tz::America::New_York,
        )
        .unwrap()
    }

    fn now() -> DateTime<Tz> {
        chrono_tz::America::New_York.timestamp_opt(NOW, 0).unwrap()
    }

    fn row(route: &str, stop: &str, offset_secs: i64) -> RawStopUpdate {
        RawStopUpdate::departing(route, stop, NOW + offset_secs)
    }

    fn offsets(departures: &[Departure]) -> Vec<i64> {
        departures
            .iter()
            .map(|d| d.predicted_time.timestamp() - NOW)
            .collect()
    }

    #[test]
    fn single_departure_with_lead_time() {
        let updates = vec![row("A", "A46N", 600)];
        let board = normalize(&updates, &config(3, Duration::minutes(5)), &now());

        let north = board.get(dir("N"));
        assert_eq!(north.len(), 1);
        assert_eq!(north[0].route_id, "A");
        assert_eq!(north[0].direction, dir("N"));
        assert!(board.contains(dir("S")));
        assert!(board.get(dir("S")).is_empty());
    }

    #[test]
    fn sorts_by_predicted_time() {
        let updates = vec![row("A", "A46N", 120), row("C", "A46N", 60)];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());

        assert_eq!(offsets(board.get(dir("N"))), vec![60, 120]);
        assert_eq!(board.get(dir("N"))[0].route_id, "C");
    }

    #[test]
    fn filtered_route_is_dropped() {
        let updates = vec![row("E", "A46N", 600), row("E", "A46S", 600)];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert!(board.is_empty());
    }

    #[test]
    fn truncates_to_earliest() {
        let updates: Vec<_> = [900, 300, 600, 1200, 60]
            .into_iter()
            .map(|o| row("A", "A46S", o))
            .collect();
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert_eq!(offsets(board.get(dir("S"))), vec![60, 300, 600]);
    }

    #[test]
    fn empty_direction_still_present() {
        let updates = vec![row("A", "A46S", 600)];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert!(board.contains(dir("N")));
        assert!(board.get(dir("N")).is_empty());
        assert_eq!(board.get(dir("S")).len(), 1);
    }

    #[test]
    fn empty_feed_gives_empty_entries() {
        let board = normalize(&[], &config(3, Duration::zero()), &now());
        assert_eq!(board.directions().collect::<Vec<_>>(), vec![dir("N"), dir("S")]);
        assert!(board.is_empty());
    }

    #[test]
    fn ties_keep_feed_order() {
        let updates = vec![
            row("C", "A46N", 300),
            row("A", "A46N", 300),
            row("C", "A46N", 100),
        ];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        let routes: Vec<_> = board
            .get(dir("N"))
            .iter()
            .map(|d| d.route_id.as_str())
            .collect();
        assert_eq!(routes, vec!["C", "C", "A"]);
    }

    #[test]
    fn other_stations_and_directions_dropped() {
        let updates = vec![
            row("A", "A45N", 600),
            row("A", "A46E", 600),
            row("A", "A46", 600),
            row("A", "", 600),
            row("A", "A46NX", 600),
        ];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert!(board.is_empty());
    }

    #[test]
    fn station_id_matches_as_prefix() {
        let config = StationConfig::new(
            "A4",
            ["A"],
            vec![(dir("N"), "North".to_string())],
            3,
            Duration::zero(),
            chrono_tz::America::New_York,
        )
        .unwrap();
        let updates = vec![row("A", "A46N", 600), row("A", "A46S", 600), row("A", "B46N", 600)];
        let board = normalize(&updates, &config, &now());

        let north = board.get(dir("N"));
        assert_eq!(north.len(), 1);
        assert_eq!(north[0].route_id, "A");
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn zero_lead_keeps_now_and_later_only() {
        let updates = vec![
            row("A", "A46N", -1),
            row("A", "A46N", 0),
            row("A", "A46N", 1),
        ];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert_eq!(offsets(board.get(dir("N"))), vec![0, 1]);
    }

    #[test]
    fn lead_time_drops_imminent() {
        let updates = vec![
            row("A", "A46N", 240),
            row("A", "A46N", 299),
            row("A", "A46N", 300),
        ];
        let board = normalize(&updates, &config(3, Duration::minutes(5)), &now());
        assert_eq!(offsets(board.get(dir("N"))), vec![300]);
    }

    #[test]
    fn arrival_used_when_no_departure() {
        let updates = vec![
            RawStopUpdate {
                route_id: "A".into(),
                stop_id: "A46S".into(),
                departure_time: None,
                arrival_time: Some(NOW + 400),
            },
            RawStopUpdate {
                route_id: "A".into(),
                stop_id: "A46S".into(),
                departure_time: None,
                arrival_time: None,
            },
        ];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert_eq!(offsets(board.get(dir("S"))), vec![400]);
    }

    #[test]
    fn departure_wins_over_arrival() {
        let updates = vec![RawStopUpdate {
            route_id: "A".into(),
            stop_id: "A46S".into(),
            departure_time: Some(NOW + 500),
            arrival_time: Some(NOW - 500),
        }];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert_eq!(offsets(board.get(dir("S"))), vec![500]);
    }

    #[test]
    fn out_of_range_epoch_dropped() {
        let updates = vec![RawStopUpdate::departing("A", "A46N", i64::MAX)];
        let board = normalize(&updates, &config(3, Duration::zero()), &now());
        assert!(board.is_empty());
    }

    #[test]
    fn times_are_in_station_zone() {
        // `now` given in UTC is converted before comparing.
        let utc_now = chrono_tz::UTC.timestamp_opt(NOW, 0).unwrap();
        let updates = vec![row("A", "A46N", 60)];
        let board = normalize(&updates, &config(3, Duration::zero()), &utc_now);

        let dep = &board.get(dir("N"))[0];
        assert_eq!(dep.predicted_time.timezone(), chrono_tz::America::New_York);
    }

    #[test]
    fn lead_time_across_dst_fall_back() {
        // 2026-11-01 01:59:00 EDT; clocks go back to 01:00 EST one minute later.
        let tz = chrono_tz::America::New_York;
        let before = tz
            .with_ymd_and_hms(2026, 11, 1, 1, 59, 0)
            .earliest()
            .unwrap();
        let config = StationConfig::new(
            "A46",
            ["A"],
            vec![(dir("N"), "Manhattan-bound".to_string())],
            3,
            Duration::minutes(5),
            tz,
        )
        .unwrap();

        // Ten real minutes later the wall clock reads 01:09 EST.
        let later = before.timestamp() + 600;
        let updates = vec![RawStopUpdate::departing("A", "A46N", later)];
        let board = normalize(&updates, &config, &before);

        assert_eq!(board.get(dir("N")).len(), 1);
        assert_eq!(
            board.get(dir("N"))[0].predicted_time.format("%H:%M %Z").to_string(),
            "01:09 EST"
        );
    }

    #[test]
    fn deterministic() {
        let updates = vec![
            row("A", "A46N", 300),
            row("C", "A46S", 200),
            row("A", "A46S", 100),
            row("E", "A46N", 50),
        ];
        let config = config(2, Duration::zero());
        assert_eq!(
            normalize(&updates, &config, &now()),
            normalize(&updates, &config, &now())
        );
    }
}

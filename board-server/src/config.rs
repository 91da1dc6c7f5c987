//! Process configuration.
//!
//! Everything is read once at startup from environment variables. Unset
//! variables fall back to the Utica Av (A/C) deployment.

use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use chrono::Duration;
use chrono_tz::Tz;

use crate::domain::{ConfigError, DirectionCode, StationConfig};
use crate::feed::FeedConfig;
use crate::render::{LayoutConfig, LayoutError};

const DEFAULT_STATION_ID: &str = "A46";
const DEFAULT_ROUTES: &str = "A,C";
const DEFAULT_DIRECTIONS: &str = "N=Manhattan-bound,S=Brooklyn-bound";
const DEFAULT_TIME_ZONE: &str = "America/New_York";
const DEFAULT_TITLE: &str = "Utica Av (A/C)";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

/// Errors from reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A variable is set to something unparseable
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid station configuration: {0}")]
    Station(#[from] ConfigError),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Complete configuration of the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub station: StationConfig,
    pub layout: LayoutConfig,
    /// Seconds between reloads of the HTML wrapper page
    pub refresh_secs: u64,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable
    /// name to its value.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `FEED_URL` | MTA A/C/E feed |
    /// | `FEED_TIMEOUT_SECS` | 10 |
    /// | `STATION_ID` | `A46` |
    /// | `ROUTES` | `A,C` |
    /// | `DIRECTIONS` | `N=Manhattan-bound,S=Brooklyn-bound` |
    /// | `TIME_ZONE` | `America/New_York` |
    /// | `MIN_LEAD_SECS` | 0 |
    /// | `MAX_RESULTS` | 3 |
    /// | `CANVAS_WIDTH` / `CANVAS_HEIGHT` | 800 / 600 |
    /// | `TITLE` | `Utica Av (A/C)` |
    /// | `TIME_FORMAT` | `%H:%M` |
    /// | `REFRESH_SECS` | 60 |
    /// | `BIND_ADDR` | `0.0.0.0:5000` |
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        let mut feed = FeedConfig::default();
        if let Some(url) = lookup("FEED_URL") {
            feed.url = url;
        }
        let timeout_secs: u64 = parse(&lookup, "FEED_TIMEOUT_SECS", feed.timeout_secs)?;
        if timeout_secs == 0 {
            return Err(invalid("FEED_TIMEOUT_SECS", "0", "must be positive"));
        }
        let feed = feed.with_timeout(timeout_secs);

        let routes: Vec<String> = get("ROUTES", DEFAULT_ROUTES)
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();

        let directions = parse_directions(&get("DIRECTIONS", DEFAULT_DIRECTIONS))?;

        let tz_name = get("TIME_ZONE", DEFAULT_TIME_ZONE);
        let time_zone: Tz = tz_name
            .parse()
            .map_err(|e| invalid("TIME_ZONE", &tz_name, e))?;

        let min_lead_secs: i64 = parse(&lookup, "MIN_LEAD_SECS", 0)?;
        let min_lead_time = Duration::try_seconds(min_lead_secs).ok_or_else(|| {
            invalid("MIN_LEAD_SECS", &min_lead_secs.to_string(), "out of range")
        })?;
        let max_results: usize = parse(&lookup, "MAX_RESULTS", 3)?;

        let station = StationConfig::new(
            get("STATION_ID", DEFAULT_STATION_ID),
            routes,
            directions,
            max_results,
            min_lead_time,
            time_zone,
        )?;

        let width: u32 = parse(&lookup, "CANVAS_WIDTH", 800)?;
        let height: u32 = parse(&lookup, "CANVAS_HEIGHT", 600)?;
        let layout = LayoutConfig::new(width, height, get("TITLE", DEFAULT_TITLE), time_zone)
            .with_columns_for(station.directions(), station.max_results_per_direction())
            .with_time_format(get("TIME_FORMAT", "%H:%M"));
        layout.validate()?;

        let refresh_secs: u64 = parse(&lookup, "REFRESH_SECS", 60)?;
        if refresh_secs == 0 {
            return Err(invalid("REFRESH_SECS", "0", "must be positive"));
        }
        let bind_addr: SocketAddr = {
            let raw = get("BIND_ADDR", DEFAULT_BIND_ADDR);
            raw.parse().map_err(|e| invalid("BIND_ADDR", &raw, e))?
        };

        Ok(Self {
            feed,
            station,
            layout,
            refresh_secs,
            bind_addr,
        })
    }
}

/// Parse `N=Manhattan-bound,S=Brooklyn-bound` into ordered pairs.
fn parse_directions(raw: &str) -> Result<Vec<(DirectionCode, String)>, LoadError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (code, label) = entry
                .split_once('=')
                .ok_or_else(|| invalid("DIRECTIONS", raw, "expected CODE=Label"))?;
            let code =
                DirectionCode::parse(code.trim()).map_err(|e| invalid("DIRECTIONS", raw, e))?;
            Ok((code, label.trim().to_string()))
        })
        .collect()
}

fn parse<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, LoadError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| invalid(var, &value, e)),
        None => Ok(default),
    }
}

fn invalid(var: &'static str, value: &str, reason: impl Display) -> LoadError {
    LoadError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

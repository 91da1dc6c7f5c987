//! Domain error types.
//!
//! These errors represent invalid station configuration. Rows in the
//! feed never produce errors; they are dropped by the normalizer.

/// Validation failures when building a [`StationConfig`](super::StationConfig).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Station identifier is empty
    #[error("station id must not be empty")]
    EmptyStationId,

    /// No routes accepted
    #[error("route filter must contain at least one route")]
    EmptyRouteFilter,

    /// No direction codes configured
    #[error("at least one direction must be configured")]
    NoDirections,

    /// The same direction code appears twice
    #[error("direction {0} configured more than once")]
    DuplicateDirection(char),

    /// `max_results_per_direction` was zero
    #[error("max results per direction must be positive")]
    ZeroMaxResults,

    /// Lead time is negative
    #[error("minimum lead time must not be negative")]
    NegativeLeadTime,
}

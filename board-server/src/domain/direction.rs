//! Direction codes.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid direction code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction code: {reason}")]
pub struct InvalidDirection {
    reason: &'static str,
}

/// A single-character direction suffix of a stop identifier.
///
/// On the New York subway feed a platform ID is the station ID followed
/// by `N` or `S`, e.g. `A46N` is the northbound platform at Utica Av.
///
/// # Examples
///
/// ```
/// use board_server::domain::DirectionCode;
///
/// let north = DirectionCode::parse("N").unwrap();
/// assert_eq!(north.as_char(), 'N');
///
/// assert!(DirectionCode::parse("").is_err());
/// assert!(DirectionCode::parse("NS").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct DirectionCode(char);

impl DirectionCode {
    /// Parse a direction code from a one-character string.
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        let mut chars = s.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(InvalidDirection {
                reason: "must be exactly 1 character",
            });
        };
        Self::from_char(c)
    }

    /// Build a direction code from a single character.
    pub fn from_char(c: char) -> Result<Self, InvalidDirection> {
        if !c.is_ascii_alphanumeric() {
            return Err(InvalidDirection {
                reason: "must be an ASCII letter or digit",
            });
        }
        Ok(DirectionCode(c))
    }

    /// Returns the code as a character.
    pub fn as_char(&self) -> char {
        self.0
    }
}

impl fmt::Debug for DirectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectionCode({})", self.0)
    }
}

impl fmt::Display for DirectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DirectionCode> for String {
    fn from(code: DirectionCode) -> Self {
        code.0.to_string()
    }
}

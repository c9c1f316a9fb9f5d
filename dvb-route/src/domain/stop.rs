//! Stop identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop id: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// What kind of place an identifier refers to.
///
/// The WebAPI accepts addresses, coordinates and points of interest
/// wherever it accepts a stop, distinguished by a prefix on the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PoiKind {
    Stop,
    Address,
    Coords,
    Poi,
}

impl PoiKind {
    /// Classify an identifier.
    ///
    /// Prefixed ids only count as such when they carry at least four
    /// colon-separated parts; anything else is a plain stop.
    pub fn of(id: &str) -> Self {
        let mut parts = id.split(':');
        let prefix = parts.next().unwrap_or_default();

        if parts.take(3).count() < 3 {
            return PoiKind::Stop;
        }

        match prefix {
            "streetID" => PoiKind::Address,
            "coord" => PoiKind::Coords,
            "poiID" => PoiKind::Poi,
            _ => PoiKind::Stop,
        }
    }
}

/// An opaque identifier for a stop or other routable point.
///
/// The only guarantee is that the identifier is not blank; its content is
/// defined by the remote system.
///
/// # Examples
///
/// ```
/// use dvb_route::domain::{PoiKind, StopId};
///
/// let postplatz = StopId::parse("33000037").unwrap();
/// assert_eq!(postplatz.as_str(), "33000037");
/// assert_eq!(postplatz.kind(), PoiKind::Stop);
///
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be blank",
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap an identifier known at compile time to be non-blank.
    pub(crate) fn from_static(id: &'static str) -> Self {
        debug_assert!(!id.trim().is_empty());
        Self(id.to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify the identifier.
    pub fn kind(&self) -> PoiKind {
        PoiKind::of(&self.0)
    }
}

impl FromStr for StopId {
    type Err = InvalidStopId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

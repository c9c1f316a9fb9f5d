//! Stop search: `POST /tr/pointfinder`.
//!
//! The point finder answers with pipe-delimited strings rather than JSON
//! objects, one per match:
//!
//! ```text
//! 33000028|||Hauptbahnhof|5657516|4621644|0||
//! id      |t|city|name   |right  |up     |distance
//! ```
//!
//! Coordinates are Gauss-Krüger zone 4 integers.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::PoiKind;

/// Endpoint path, relative to the base URL.
pub(crate) const PATH: &str = "/tr/pointfinder";

/// Minimum number of `|`-separated fields in a point.
const MIN_FIELDS: usize = 6;

/// Error returned when parsing a malformed point string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point: {reason}")]
pub struct InvalidPoint {
    reason: &'static str,
}

impl InvalidPoint {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A single point finder match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub id: String,
    pub city: String,
    pub name: String,
    /// GK4 (right, up).
    pub coords: (i64, i64),
    pub kind: PoiKind,
}

impl Point {
    /// Parse a pipe-delimited point string.
    ///
    /// # Examples
    ///
    /// ```
    /// use dvb_route::vvo::Point;
    ///
    /// let p = Point::parse("33000037|||Postplatz|5657164|4621159|0||").unwrap();
    /// assert_eq!(p.id, "33000037");
    /// assert_eq!(p.city, "");
    /// assert_eq!(p.name, "Postplatz");
    /// assert_eq!(p.coords, (5657164, 4621159));
    ///
    /// assert!(Point::parse("33000037|||Postplatz").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidPoint> {
        let parts: Vec<&str> = s.split('|').collect();
        if parts.len() < MIN_FIELDS {
            return Err(InvalidPoint::new("expected at least 6 fields"));
        }

        let id = parts[0];
        if id.is_empty() {
            return Err(InvalidPoint::new("missing id"));
        }

        let right = parts[4]
            .parse()
            .map_err(|_| InvalidPoint::new("right coordinate must be an integer"))?;
        let up = parts[5]
            .parse()
            .map_err(|_| InvalidPoint::new("up coordinate must be an integer"))?;

        Ok(Self {
            id: id.to_string(),
            city: parts[2].to_string(),
            name: parts[3].to_string(),
            coords: (right, up),
            kind: PoiKind::of(id),
        })
    }
}

impl FromStr for Point {
    type Err = InvalidPoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point {
            id,
            city,
            name,
            coords: (right, up),
            ..
        } = self;
        write!(f, "{id}||{city}|{name}|{right}|{up}|0||")
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PointVisitor)
    }
}

struct PointVisitor;

impl Visitor<'_> for PointVisitor {
    type Value = Point;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string in \"id||city|name|right|up|0||\" format")
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
        Point::parse(s).map_err(|_| E::invalid_value(de::Unexpected::Str(s), &self))
    }
}

/// Request body for a point search.
#[derive(Debug, Clone, Serialize)]
pub struct Params<'a> {
    /// Free-text query, e.g. `"Postplatz"`.
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Only return stops, no addresses or POIs.
    #[serde(rename = "stopsOnly")]
    pub stops_only: bool,
    /// Include the stops assigned to an address or POI.
    #[serde(rename = "assignedstops")]
    pub assigned_stops: bool,
    /// Restrict results to the DVB network.
    pub dvb: bool,
    pub format: &'static str,
}

impl<'a> Params<'a> {
    /// A stop-only search for `query`.
    pub fn stops(query: &'a str) -> Self {
        Self {
            query,
            limit: None,
            stops_only: true,
            assigned_stops: false,
            dvb: true,
            format: "json",
        }
    }

    /// A search that also returns addresses and points of interest.
    pub fn all(query: &'a str) -> Self {
        Self {
            stops_only: false,
            ..Self::stops(query)
        }
    }

    /// Limit the number of matches.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Payload of a point finder response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Found {
    /// `"Identified"`, `"List"` or `"NotIdentified"`.
    pub point_status: Option<String>,
    #[serde(default)]
    pub points: Vec<Point>,
}

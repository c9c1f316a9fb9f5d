//! Trip details: `POST /dm/trip`.
//!
//! Lists every stop of a single vehicle run, identified by the trip id
//! from a departure or a route's `StatelessId`.

use serde::{Deserialize, Serialize};

use crate::domain::{DvbTime, StopId};

use super::route::Platform;

/// Endpoint path, relative to the base URL.
pub(crate) const PATH: &str = "/dm/trip";

/// Request body for trip details.
#[derive(Debug, Clone, Serialize)]
pub struct Params<'a> {
    pub tripid: &'a str,
    pub time: DvbTime,
    /// A stop served by the trip, used to anchor `time`.
    pub stopid: &'a StopId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapdata: Option<bool>,
}

impl<'a> Params<'a> {
    pub fn new(tripid: &'a str, stopid: &'a StopId, time: DvbTime) -> Self {
        Self {
            tripid,
            time,
            stopid,
            mapdata: None,
        }
    }
}

/// Where a stop lies relative to the anchor stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Previous,
    Current,
    Next,
    #[serde(other)]
    Other,
}

/// A stop along the trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TripStop {
    pub id: Option<String>,
    pub name: Option<String>,
    pub place: Option<String>,
    pub platform: Option<Platform>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub position: Option<Position>,
    pub sequence_on_trip: Option<u32>,
    pub time: Option<DvbTime>,
    pub real_time: Option<DvbTime>,
}

/// Payload of a trip details response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trip {
    #[serde(default)]
    pub stops: Vec<TripStop>,
}

impl Trip {
    /// The anchor stop, if the API marked one.
    pub fn current(&self) -> Option<&TripStop> {
        self.stops
            .iter()
            .find(|s| s.position == Some(Position::Current))
    }
}

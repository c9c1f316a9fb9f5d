//! Departure monitor: `POST /dm`.

use serde::{Deserialize, Serialize};

use crate::domain::{ArrivalState, DvbTime, Mot, StopId};

use super::route::{Diva, Platform};

/// Endpoint path, relative to the base URL.
pub(crate) const PATH: &str = "/dm";

/// Request body for the departure monitor.
#[derive(Debug, Clone, Serialize)]
pub struct Params<'a> {
    pub stopid: &'a StopId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<DvbTime>,
    /// Interpret `time` as arrival time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isarrival: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shorttermchanges: Option<bool>,
    /// Only return these modes of transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mot: Option<&'a [Mot]>,
    pub format: &'static str,
}

impl<'a> Params<'a> {
    /// Upcoming departures at `stopid`, from now.
    pub fn new(stopid: &'a StopId) -> Self {
        Self {
            stopid,
            limit: None,
            time: None,
            isarrival: None,
            shorttermchanges: Some(true),
            mot: None,
            format: "json",
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_time(mut self, time: DvbTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_mot(mut self, mot: &'a [Mot]) -> Self {
        self.mot = Some(mot);
        self
    }
}

/// A single departure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Departure {
    pub id: String,
    pub dl_id: Option<String>,
    pub line_name: String,
    pub direction: String,
    pub platform: Option<Platform>,
    pub mot: Mot,
    pub scheduled_time: Option<DvbTime>,
    pub real_time: Option<DvbTime>,
    pub state: Option<ArrivalState>,
    #[serde(default)]
    pub route_changes: Vec<String>,
    pub diva: Option<Diva>,
    #[serde(default)]
    pub cancel_reasons: Vec<String>,
    pub occupancy: Option<String>,
}

/// Payload of a departure monitor response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DepartureMonitor {
    pub name: Option<String>,
    pub place: Option<String>,
    #[serde(default)]
    pub departures: Vec<Departure>,
}

impl DepartureMonitor {
    /// The next departure of a given line, if any.
    pub fn next_line(&self, line_name: &str) -> Option<&Departure> {
        self.departures.iter().find(|dep| dep.line_name == line_name)
    }
}

//! Lines serving a stop: `POST /stt/lines`.

use serde::{Deserialize, Serialize};

use crate::domain::{Mot, StopId};

use super::route::Diva;

/// Endpoint path, relative to the base URL.
pub(crate) const PATH: &str = "/stt/lines";

/// Request body for a lines query.
#[derive(Debug, Clone, Serialize)]
pub struct Params<'a> {
    pub stopid: &'a StopId,
    pub format: &'static str,
}

impl<'a> Params<'a> {
    pub fn new(stopid: &'a StopId) -> Self {
        Self {
            stopid,
            format: "json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimeTable {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Direction {
    pub name: String,
    #[serde(default)]
    pub time_tables: Vec<TimeTable>,
}

/// A line and the directions it runs from the stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Line {
    pub name: String,
    pub mot: Mot,
    #[serde(default)]
    pub changes: Vec<String>,
    pub diva: Option<Diva>,
    #[serde(default)]
    pub directions: Vec<Direction>,
}

/// Payload of a lines response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lines {
    #[serde(default)]
    pub lines: Vec<Line>,
}

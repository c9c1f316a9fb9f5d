//! Route changes and disruptions: `POST /rc` and `POST /rc/lines`.

use serde::{Deserialize, Serialize};

use crate::domain::{DvbTime, Mot};

use super::route::Diva;

/// Endpoint path, relative to the base URL.
pub(crate) const PATH: &str = "/rc";

/// Path of the affected-lines endpoint.
pub(crate) const LINES_PATH: &str = "/rc/lines";

/// Request body for route changes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Params<'a> {
    /// Include short-term changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortterm: Option<bool>,
    /// Operator filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<&'a str>,
}

/// Request body for the lines affected by changes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinesParams<'a> {
    /// Operator filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidityPeriod {
    pub begin: Option<DvbTime>,
    pub end: Option<DvbTime>,
}

/// A single announced change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    pub id: Option<String>,
    pub title: Option<String>,
    /// HTML fragment.
    pub description: Option<String>,
    pub r#type: Option<String>,
    pub trip_request_include: Option<bool>,
    pub publish_date: Option<DvbTime>,
    #[serde(default)]
    pub line_ids: Vec<String>,
    #[serde(default)]
    pub validity_periods: Vec<ValidityPeriod>,
}

/// A network-wide notice shown above the list of changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Banner {
    pub title: Option<String>,
    pub description: Option<String>,
    pub r#type: Option<String>,
    pub modified_time: Option<DvbTime>,
    pub trip_request_include: Option<bool>,
}

/// A line affected by changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AffectedLine {
    pub id: Option<String>,
    pub name: Option<String>,
    pub mot: Option<Mot>,
    pub transportation_company: Option<String>,
    #[serde(default)]
    pub divas: Vec<Diva>,
}

/// Payload of a route changes response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteChanges {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub banners: Vec<Banner>,
    #[serde(default)]
    pub lines: Vec<AffectedLine>,
}

/// Payload of an affected-lines response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteChangeLines {
    #[serde(default)]
    pub lines: Vec<AffectedLine>,
}

impl RouteChanges {
    /// Changes that mention the line with the given id.
    pub fn for_line<'a>(&'a self, line_id: &'a str) -> impl Iterator<Item = &'a Change> {
        self.changes
            .iter()
            .filter(move |c| c.line_ids.iter().any(|id| id == line_id))
    }
}

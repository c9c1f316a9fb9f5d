//! VVO WebAPI HTTP client.
//!
//! Every endpoint is a `POST` with a JSON body. Responses share the
//! [`Response`] envelope, whose status is checked before the payload is
//! decoded.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::{DvbTime, StopId};
use crate::query::RouteSource;

use super::changes::{self, RouteChangeLines, RouteChanges};
use super::error::VvoError;
use super::lines::{self, Lines};
use super::monitor::{self, DepartureMonitor};
use super::point::{self, Found};
use super::response::{Response, StatusOnly};
use super::route::{self, Routes};
use super::trip::{self, Trip};

/// Default base URL for the WebAPI.
pub const DEFAULT_BASE_URL: &str = "https://webapi.vvo-online.de";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// How much of an undecodable body to keep in the error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the VVO client.
#[derive(Debug, Clone)]
pub struct VvoConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl VvoConfig {
    /// Create a config pointing at the production WebAPI.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("dvb-route/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

impl Default for VvoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// VVO WebAPI client.
#[derive(Debug, Clone)]
pub struct VvoClient {
    http: reqwest::Client,
    base_url: String,
}

impl VvoClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VvoConfig) -> Result<Self, VvoError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Find routes between two stops.
    pub async fn route(&self, params: &route::Params<'_>) -> Result<Response<Routes>, VvoError> {
        self.post(route::PATH, params).await
    }

    /// Find routes between two stops, keeping the payload exactly as sent.
    ///
    /// The status is checked as for [`VvoClient::route`]; the returned value
    /// is the response body without its `Status` and `ExpirationTime`.
    pub async fn route_json(&self, params: &route::Params<'_>) -> Result<Value, VvoError> {
        payload(self.send(route::PATH, params).await?)
    }

    /// Search for stops, addresses and points of interest.
    pub async fn find_points(&self, params: &point::Params<'_>) -> Result<Response<Found>, VvoError> {
        self.post(point::PATH, params).await
    }

    /// Upcoming departures at a stop.
    pub async fn departure_monitor(
        &self,
        params: &monitor::Params<'_>,
    ) -> Result<Response<DepartureMonitor>, VvoError> {
        self.post(monitor::PATH, params).await
    }

    /// All stops of one vehicle run.
    pub async fn trip_details(&self, params: &trip::Params<'_>) -> Result<Response<Trip>, VvoError> {
        self.post(trip::PATH, params).await
    }

    /// Lines serving a stop.
    pub async fn lines(&self, stop: &StopId) -> Result<Response<Lines>, VvoError> {
        self.post(lines::PATH, &lines::Params::new(stop)).await
    }

    /// Announced route changes and disruptions.
    pub async fn route_changes(
        &self,
        params: &changes::Params<'_>,
    ) -> Result<Response<RouteChanges>, VvoError> {
        self.post(changes::PATH, params).await
    }

    /// Lines currently affected by route changes.
    pub async fn route_change_lines(
        &self,
        params: &changes::LinesParams<'_>,
    ) -> Result<Response<RouteChangeLines>, VvoError> {
        self.post(changes::LINES_PATH, params).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<Response<T>, VvoError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode_value(self.send(path, body).await?)
    }

    async fn send<B>(&self, path: &str, body: &B) -> Result<Value, VvoError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        debug!(endpoint = path, status = status.as_u16(), "VVO response");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(VvoError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VvoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_body(&body)
    }
}

#[async_trait]
impl RouteSource for VvoClient {
    async fn route(
        &self,
        origin: &StopId,
        destination: &StopId,
        time: DvbTime,
        is_arrival_time: bool,
    ) -> Result<Value, VvoError> {
        let params = route::Params::new(origin, destination, time, is_arrival_time);
        self.route_json(&params).await
    }

    async fn route_via(
        &self,
        origin: &StopId,
        destination: &StopId,
        via: &StopId,
        time: DvbTime,
        is_arrival_time: bool,
    ) -> Result<Value, VvoError> {
        let params = route::Params::new(origin, destination, time, is_arrival_time).with_via(via);
        self.route_json(&params).await
    }
}

fn parse_body(body: &str) -> Result<Value, VvoError> {
    serde_json::from_str(body).map_err(|e| json_error(e, Some(body)))
}

/// Decode a response body, checking its status before the payload.
#[cfg(test)]
fn decode<T: DeserializeOwned>(body: &str) -> Result<Response<T>, VvoError> {
    decode_value(parse_body(body)?)
}

/// Decode a parsed response body, checking its status before the payload.
pub(crate) fn decode_value<T: DeserializeOwned>(value: Value) -> Result<Response<T>, VvoError> {
    check_status(&value)?;
    serde_json::from_value(value).map_err(|e| json_error(e, None))
}

/// The payload fields of an accepted response, untouched.
pub(crate) fn payload(mut value: Value) -> Result<Value, VvoError> {
    check_status(&value)?;

    if let Value::Object(map) = &mut value {
        map.shift_remove("Status");
        map.shift_remove("ExpirationTime");
    }
    Ok(value)
}

fn check_status(value: &Value) -> Result<(), VvoError> {
    let StatusOnly { status } = StatusOnly::deserialize(value).map_err(|e| json_error(e, None))?;

    if status.is_ok() {
        Ok(())
    } else {
        Err(VvoError::Status {
            code: status.code,
            message: status.message,
        })
    }
}

fn json_error(err: serde_json::Error, body: Option<&str>) -> VvoError {
    VvoError::Json {
        message: err.to_string(),
        body: body.map(|b| b.chars().take(BODY_EXCERPT_CHARS).collect()),
    }
}

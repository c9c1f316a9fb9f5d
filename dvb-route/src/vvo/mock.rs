//! Mock VVO client for working without network access.
//!
//! Serves a recorded `tr/trips` response body from disk as if it were
//! the live API's answer.

use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::{DvbTime, StopId};
use crate::query::RouteSource;

use super::client::{decode_value, payload};
use super::error::VvoError;
use super::response::Response;
use super::route::Routes;

/// Mock client that serves a recorded route response.
///
/// The recorded body goes through the same status check as a live one,
/// so a fixture with a rejected status reproduces the failure path.
#[derive(Debug, Clone)]
pub struct MockVvoClient {
    body: Value,
}

impl MockVvoClient {
    /// Load a recorded response from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VvoError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| {
            VvoError::NotConfigured(format!("failed to read mock file {}: {e}", path.display()))
        })?;

        let body = serde_json::from_str(&json).map_err(|e| {
            VvoError::NotConfigured(format!("failed to parse mock file {}: {e}", path.display()))
        })?;

        Ok(Self { body })
    }

    /// The recorded response, decoded.
    pub fn response(&self) -> Result<Response<Routes>, VvoError> {
        decode_value(self.body.clone())
    }
}

#[async_trait]
impl RouteSource for MockVvoClient {
    /// Inputs are ignored; the recorded routes are static.
    async fn route(
        &self,
        origin: &StopId,
        destination: &StopId,
        time: DvbTime,
        is_arrival_time: bool,
    ) -> Result<Value, VvoError> {
        debug!(%origin, %destination, %time, is_arrival_time, "serving recorded route");
        payload(self.body.clone())
    }
}

//! Response envelope shared by every WebAPI endpoint.
//!
//! Each response carries a `Status` object next to its payload fields:
//!
//! ```json
//! { "Status": { "Code": "Ok" }, "ExpirationTime": "/Date(...)/", "Routes": [...] }
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::domain::DvbTime;

/// Status code reported by the WebAPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    Ok,
    ValidationError,
    ServiceError,
    #[serde(other)]
    Other,
}

/// The `Status` object of a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    pub code: StatusCode,
    pub message: Option<String>,
}

impl Status {
    /// Whether the request was accepted.
    pub fn is_ok(&self) -> bool {
        self.code == StatusCode::Ok
    }
}

/// Just the status, for checking a body before decoding its payload.
///
/// Rejected requests usually omit the payload fields entirely, so the
/// status has to be inspected first to report the real cause.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StatusOnly {
    pub status: Status,
}

/// A decoded response: status, optional expiry and the endpoint's payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Response<T> {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<DvbTime>,
    #[serde(flatten)]
    pub content: T,
}

impl<T> Response<T> {
    /// Discard the envelope and return the payload.
    pub fn into_inner(self) -> T {
        self.content
    }
}

impl<T> Deref for Response<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.content
    }
}

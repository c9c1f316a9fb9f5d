//! VVO WebAPI client.
//!
//! The Dresden transport association (VVO) publishes a JSON API at
//! `webapi.vvo-online.de`. It does the actual routing; this module only
//! shapes requests and decodes responses.
//!
//! Key characteristics of the WebAPI:
//! - Every endpoint is a `POST` with a JSON body
//! - Response fields are PascalCase, request fields are lowercase or camelCase
//! - Times travel as `/Date(<millis><+HHMM>)/` strings
//! - A `Status` object reports rejections with HTTP 200

mod client;
mod error;
mod mock;
mod response;

pub mod changes;
pub mod lines;
pub mod monitor;
pub mod point;
pub mod route;
pub mod trip;

pub use client::{DEFAULT_BASE_URL, VvoClient, VvoConfig};
pub use error::VvoError;
pub use mock::MockVvoClient;
pub use point::{Found, InvalidPoint, Point};
pub use response::{Response, Status, StatusCode};
pub use route::Routes;

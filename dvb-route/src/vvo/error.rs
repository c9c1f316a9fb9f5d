//! WebAPI client error types.

use super::response::StatusCode;

/// Errors from the VVO WebAPI client.
#[derive(Debug, thiserror::Error)]
pub enum VvoError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", fmt_body(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered, but reported a failure in its status envelope
    #[error("request rejected ({code:?}){}", fmt_message(.message))]
    Status {
        code: StatusCode,
        message: Option<String>,
    },

    /// Rate limited by the API
    #[error("rate limited by VVO WebAPI")]
    RateLimited,

    /// Feature not configured or not available
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn fmt_body(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

fn fmt_message(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

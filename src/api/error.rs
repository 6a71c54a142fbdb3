//! Error classification for backend responses.
//!
//! Every HTTP outcome the gateway can produce is a distinct variant, so
//! callers branch on structure instead of matching message strings. The
//! `Unauthorized` variant is the signal screens route into the logout
//! transition; everything else renders as an ordinary failure.

use reqwest::StatusCode;
use thiserror::Error;

/// Fallback when an error body carries no usable `detail` field.
const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// A resource that the operation requires did not exist (HTTP 404 on a
    /// path where absence is not a valid outcome). Plain lookups surface 404
    /// as `Ok(None)` instead.
    #[error("resource not found")]
    NotFound,

    /// HTTP 401 or 403 on an authenticated route: the session is no longer
    /// valid, regardless of what the body says.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status. The message is the server's `detail`
    /// field when present.
    #[error("{message}")]
    RequestFailed { status: StatusCode, message: String },

    /// The server answered with success but a body that does not decode.
    #[error("failed to decode response body: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The request never completed: connection refused, DNS, timeout.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// True when the caller should tear down the session and re-authenticate.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Classify a non-success response into the matching variant.
    pub(crate) fn from_failure(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            _ => ApiError::RequestFailed {
                status,
                message: error_detail(body),
            },
        }
    }
}

/// Extract the user-visible message from an error body.
///
/// The backend reports failures as `{"detail": ...}`. A string detail is used
/// verbatim; a structured detail (validation errors) is stringified; anything
/// else falls back to a generic message.
pub(crate) fn error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return GENERIC_FAILURE.to_string();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(detail) => detail.to_string(),
        None => GENERIC_FAILURE.to_string(),
    }
}

//! Service error types with HTTP response mapping.
//!
//! [`VisitError`] is the central error type for the service. The
//! connection variant reproduces the legacy plain-text failure contract
//! (`Connection failed: <diagnostic>`); everything else maps to a
//! structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// Non-connection error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 3002,
///     "message": "insertion failed: ...",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum for the visit recorder.
///
/// | Variant      | Surface                                     |
/// |--------------|---------------------------------------------|
/// | `Connection` | 500, plain text `Connection failed: <diag>` |
/// | `Schema`     | logged only, never reaches a client         |
/// | `Insertion`  | 500, JSON error body                        |
/// | `Query`      | 500, JSON error body                        |
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// Store unreachable or credentials rejected. Fatal: aborts the
    /// request and becomes the entire response body.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The idempotent `CREATE TABLE IF NOT EXISTS` statement failed.
    /// Callers log this and continue; the table may already exist.
    #[error("schema creation failed: {0}")]
    Schema(String),

    /// The visit insert statement failed. Surfaced rather than
    /// swallowed so that a lost row is never reported as success.
    #[error("insertion failed: {0}")]
    Insertion(String),

    /// A read query against the visits table failed.
    #[error("query failed: {0}")]
    Query(String),
}

impl VisitError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Connection(_) => 3001,
            Self::Insertion(_) => 3002,
            Self::Query(_) => 3003,
            Self::Schema(_) => 3004,
        }
    }

    /// Returns the HTTP status code for this variant. Every variant is
    /// a server-side storage failure.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Connection(_) | Self::Schema(_) | Self::Insertion(_) | Self::Query(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for VisitError {
    fn into_response(self) -> Response {
        // The connection path keeps the legacy contract: the diagnostic
        // line is the entire body, no JSON or HTML wrapping.
        if let Self::Connection(_) = self {
            return (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response();
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_error_keeps_legacy_body() {
        let err = VisitError::Connection("could not connect to server".to_string());
        assert_eq!(
            err.to_string(),
            "Connection failed: could not connect to server"
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(VisitError::Connection(String::new()).error_code(), 3001);
        assert_eq!(VisitError::Insertion(String::new()).error_code(), 3002);
        assert_eq!(VisitError::Query(String::new()).error_code(), 3003);
        assert_eq!(VisitError::Schema(String::new()).error_code(), 3004);
    }
}

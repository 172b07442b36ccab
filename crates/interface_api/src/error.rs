//! API error handling
//!
//! Every error response has the body `{"error": <kind>, "detail": <message>}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_scheduling::SchedulingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    /// Maps a failed domain call, prefixing store failures with `context`
    ///
    /// Caller errors keep their own message and become 400s; everything else
    /// is a 500 with `"<context>: <error>"` as the detail.
    pub fn from_scheduling(context: &str, error: SchedulingError) -> Self {
        if error.is_caller_error() {
            ApiError::BadRequest(error.to_string())
        } else {
            ApiError::Internal(format!("{}: {}", context, error))
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, detail) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::Internal(msg) => {
                tracing::error!(detail = %msg, "Request failed");
                ("internal_error", msg)
            }
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;

    #[test]
    fn test_missing_insurance_is_bad_request() {
        let err = ApiError::from_scheduling("Error fetching availabilities", SchedulingError::MissingInsurance);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Insurance parameter is required"));
    }

    #[test]
    fn test_store_failure_is_prefixed_internal_error() {
        let err = ApiError::from_scheduling(
            "Error fetching insurance payers",
            SchedulingError::Port(PortError::internal("relation does not exist")),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            ApiError::Internal(detail) => {
                assert!(detail.starts_with("Error fetching insurance payers: "));
                assert!(detail.contains("relation does not exist"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

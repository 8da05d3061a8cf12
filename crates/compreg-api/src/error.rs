//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure the pipeline or the token guard can produce maps to one
//! variant here, and every variant renders as `{"message": ...}`.
//! Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use compreg_core::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::auth::AuthError;

/// Message returned for write-time store constraint failures.
pub const INVALID_PROPERTIES: &str = "Invalid values for properties.";

/// Message returned when no record exists for an id.
pub const NO_RECORD_FOUND: &str = "No record found.";

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body could not be decoded or the id could not be parsed (400).
    #[error("{0}")]
    MalformedInput(String),

    /// Structurally valid input that violates an entity invariant (400).
    #[error("{0}")]
    DomainInvalid(String),

    /// No record for the requested id (404).
    #[error("{}", NO_RECORD_FOUND)]
    NotFound,

    /// Missing, malformed, invalid or expired credential (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Store unreachable or misbehaving (500). Message is logged but not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedInput(_) | Self::DomainInvalid(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            Self::Internal(_) => {
                tracing::error!(error = %self, "internal server error");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MalformedId(_) => Self::MalformedInput(err.to_string()),
            ValidationError::InvalidCompanyType { .. } => Self::DomainInvalid(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Unauthorized(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn response_parts(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::MalformedInput("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::DomainInvalid("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Unauthorized("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn not_found_body() {
        let (status, body) = response_parts(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "No record found.");
    }

    #[tokio::test]
    async fn domain_invalid_body_is_the_reason() {
        let (status, body) =
            response_parts(ApiError::DomainInvalid(INVALID_PROPERTIES.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Invalid values for properties.");
    }

    #[tokio::test]
    async fn unauthorized_body_is_the_reason() {
        let (status, body) =
            response_parts(AuthError::MissingHeader.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message, "authorization header required");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) =
            response_parts(ApiError::Internal("pool timed out".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            !body.message.contains("pool"),
            "internal error details must not leak: {}",
            body.message
        );
    }

    #[test]
    fn validation_errors_map_to_bad_request_variants() {
        let malformed: ApiError = ValidationError::MalformedId("bad".into()).into();
        assert!(matches!(malformed, ApiError::MalformedInput(_)));
        assert_eq!(malformed.to_string(), "malformed id: bad");

        let invalid: ApiError = ValidationError::InvalidCompanyType {
            value: "Guild".into(),
        }
        .into();
        assert!(matches!(invalid, ApiError::DomainInvalid(_)));
        assert_eq!(invalid.to_string(), "invalid company type");
    }
}

/**
 * Backend Error Types
 *
 * This module defines the error taxonomy for the HTTP API. Every handler
 * returns `ApiError` on failure, and the `IntoResponse` implementation
 * translates each variant into a JSON `{message}` body with the right
 * HTTP status, so no error ever escapes as a crash.
 *
 * # Error Categories
 *
 * ## Credential Errors
 *
 * Missing, malformed, invalid or expired bearer tokens. Always terminal
 * for the request, never retried. Three distinct variants so a client can
 * tell which check failed, all mapping to 401.
 *
 * ## Upstream Errors
 *
 * The third-party data source or the AI provider is unreachable or
 * returned a non-2xx status. Surfaced as a uniform 502 response.
 *
 * ## Validation Errors
 *
 * Malformed registration fields, empty prompts. Rejected before any
 * network or database call, mapping to 400.
 *
 * ## Provider-Shape Errors
 *
 * The AI image path validates the provider response in three stages;
 * each stage failure is a distinct variant for diagnostic clarity.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::backend::auth::store::StoreError;

/// Distinct failure points when validating the AI provider's image response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderShapeError {
    /// The response contained no candidates at all
    #[error("no candidates in AI response")]
    NoCandidates,

    /// The first candidate carried no content parts
    #[error("no content parts in AI response")]
    NoContentParts,

    /// No part carried inline image data
    #[error("no image data found in AI response")]
    NoImageData,
}

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No `Authorization` header on a protected route
    #[error("No Authorization header")]
    MissingCredential,

    /// `Authorization` header is not of the shape `Bearer <token>`
    #[error("Invalid Authorization format")]
    MalformedCredential,

    /// Token signature invalid, structure unreadable, or expired
    #[error("Invalid token")]
    InvalidCredential,

    /// Credential check failed during login
    ///
    /// Deliberately does not distinguish "unknown user" from "wrong
    /// password" so callers cannot enumerate accounts.
    #[error("Invalid username or password")]
    Unauthorized,

    /// Request rejected before any network or database call
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Unique constraint collision (username or email already taken)
    #[error("{0}")]
    Conflict(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// The third-party data source or AI provider failed
    #[error("{0}")]
    Upstream(String),

    /// The AI provider responded with an unusable shape
    #[error(transparent)]
    Provider(#[from] ProviderShapeError),

    /// Anything else; detail is logged, the body stays generic
    #[error("Something went wrong!")]
    Internal(String),
}

impl ApiError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Uniform upstream-failure error for the data proxy
    pub fn upstream_data() -> Self {
        Self::Upstream("Error fetching data from external F1 API".to_string())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::MalformedCredential | Self::InvalidCredential => {
                StatusCode::UNAUTHORIZED
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Provider(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => Self::Conflict(format!("{field} already taken")),
            StoreError::NotFound => Self::NotFound("User not found".to_string()),
            StoreError::Database(e) => Self::Internal(format!("database error: {e}")),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Internal(format!("password hashing error: {err}"))
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal detail is for the logs, not the wire
        let message = match &self {
            Self::Internal(detail) => {
                tracing::error!("internal server error: {detail}");
                "Something went wrong!".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_errors_are_401() {
        assert_eq!(ApiError::MissingCredential.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::MalformedCredential.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidCredential.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_credential_errors_stay_distinct() {
        let missing = ApiError::MissingCredential.to_string();
        let malformed = ApiError::MalformedCredential.to_string();
        let invalid = ApiError::InvalidCredential.to_string();
        assert_ne!(missing, malformed);
        assert_ne!(malformed, invalid);
        assert_ne!(missing, invalid);
    }

    #[test]
    fn test_provider_shape_errors_stay_distinct() {
        let kinds = [
            ProviderShapeError::NoCandidates,
            ProviderShapeError::NoContentParts,
            ProviderShapeError::NoImageData,
        ];
        for kind in &kinds {
            assert_eq!(ApiError::Provider(kind.clone()).status_code(), StatusCode::BAD_GATEWAY);
        }
        assert_ne!(kinds[0].to_string(), kinds[1].to_string());
        assert_ne!(kinds[1].to_string(), kinds[2].to_string());
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("prompt", "Prompt is required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("Username already taken".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::upstream_data().status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let error = ApiError::Internal("connection string exposed".to_string());
        assert_eq!(error.to_string(), "Something went wrong!");
    }

    #[test]
    fn test_from_store_error() {
        let api: ApiError = StoreError::Duplicate("Username").into();
        match api {
            ApiError::Conflict(message) => assert!(message.contains("Username")),
            _ => panic!("Expected Conflict"),
        }

        let api: ApiError = StoreError::NotFound.into();
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
    }
}

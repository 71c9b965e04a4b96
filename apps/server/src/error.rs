//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in PartsDesk                              │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ServiceError::Core(CoreError)      ServiceError::Store(DbError)       │
//! │    Validation      → 400              NotFound        → 404            │
//! │    ItemNotFound    → 404              anything else   → 500 (logged)   │
//! │    InsufficientStock → 409                                             │
//! │    AuthFailed      → 401                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  { "code": "NOT_FOUND", "error": "Item not found: 42" }                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use partsdesk_core::CoreError;
use partsdesk_db::{DbError, ServiceError};

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the browser receives when a request fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "error": "Item not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    #[serde(rename = "error")]
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Sale exceeds stock under the strict policy (409)
    InsufficientStock,

    /// Wrong username or password (401)
    AuthFailed,

    /// Database operation failed (500)
    DatabaseError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::InsufficientStock => StatusCode::CONFLICT,
            ErrorCode::AuthFailed => StatusCode::UNAUTHORIZED,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts business rule errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ItemNotFound(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::AuthFailed => ErrorCode::AuthFailed,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };

        ApiError::new(code, err.to_string())
    }
}

/// Converts database errors to API errors.
///
/// Anything other than a missing row is a server fault and gets logged here,
/// once, with the full error.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            other => {
                tracing::error!(error = %other, "Database error");
                ApiError::new(ErrorCode::DatabaseError, other.to_string())
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(e) => e.into(),
            ServiceError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Convenience type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use partsdesk_core::ValidationError;

    #[test]
    fn test_core_error_status_codes() {
        let cases = [
            (CoreError::ItemNotFound(7), StatusCode::NOT_FOUND),
            (
                CoreError::InsufficientStock {
                    item_id: 7,
                    available: 1,
                    requested: 3,
                },
                StatusCode::CONFLICT,
            ),
            (CoreError::AuthFailed, StatusCode::UNAUTHORIZED),
            (
                CoreError::Validation(ValidationError::required("name")),
                StatusCode::BAD_REQUEST,
            ),
            (
                CoreError::Validation(ValidationError::too_large("profit")),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_db_error_status_codes() {
        let missing = ApiError::from(DbError::not_found("Shipment", 9));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.message, "Shipment not found: 9");

        let broken = ApiError::from(DbError::QueryFailed("no such table: items".to_string()));
        assert_eq!(broken.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(broken.code, ErrorCode::DatabaseError);
        assert!(broken.message.contains("no such table: items"));
    }

    #[test]
    fn test_service_error_unwraps_both_sides() {
        let err = ApiError::from(ServiceError::from(ValidationError::required("items")));
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = ApiError::from(ServiceError::Store(DbError::ConnectionFailed("closed".into())));
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_wire_shape() {
        let body = serde_json::to_value(ApiError::from(CoreError::AuthFailed)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "code": "AUTH_FAILED",
                "error": "Invalid username or password"
            })
        );
    }
}

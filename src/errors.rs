//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::Denial;
use crate::types::ErrorResponse;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid username or password")]
    InvalidCredentials,

    // Resource errors
    #[error("Member not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Identity provider error")]
    IdentityProvider(#[from] reqwest::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),

    /// A server-side failure reported to the caller with an operation-specific message.
    #[error("{message}")]
    Failed {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::IdentityProvider(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) | AppError::Failed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the failure originated on the server side.
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::BadRequest(msg) => msg.clone(),

            // Hide details for internal/security errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired session".to_string()
            }
            AppError::IdentityProvider(e) => {
                tracing::error!("Identity provider error: {:?}", e);
                "Identity provider unavailable".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Failed { message, source } => {
                tracing::error!(error = ?source, "{}", message);
                message.to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Extension trait replacing server-side failures with a generic,
/// operation-specific message at the handler boundary.
pub trait ResultExt<T> {
    fn or_failed(self, message: &'static str) -> AppResult<T>;
}

impl<T> ResultExt<T> for AppResult<T> {
    fn or_failed(self, message: &'static str) -> AppResult<T> {
        self.map_err(|e| {
            if e.is_server_error() {
                AppError::Failed {
                    message,
                    source: Box::new(e),
                }
            } else {
                e
            }
        })
    }
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => AppError::Unauthorized,
            Denial::Forbidden => AppError::Forbidden,
        }
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(error: AppError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_keep_message() {
        let (status, body) = body_of(AppError::validation("Invalid start date")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"Invalid start date"}"#);

        let (status, body) = body_of(AppError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, r#"{"error":"Forbidden"}"#);

        let (status, body) = body_of(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Member not found"}"#);
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let (status, body) = body_of(AppError::internal("connection refused on 10.0.0.3")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("10.0.0.3"));

        let db = AppError::from(sea_orm::DbErr::Custom("deadlock detected".into()));
        let (status, body) = body_of(db).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("deadlock"));
    }

    #[tokio::test]
    async fn test_or_failed_only_wraps_server_errors() {
        let failed: AppResult<()> = Err(AppError::internal("boom"));
        let (status, body) = body_of(failed.or_failed("Unable to save member.").unwrap_err()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"Unable to save member."}"#);

        let missing: AppResult<()> = Err(AppError::NotFound);
        let err = missing.or_failed("Unable to update member.").unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn test_denials_map_to_auth_statuses() {
        assert_eq!(
            AppError::from(Denial::Unauthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::from(Denial::Forbidden).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_ok_or_not_found() {
        assert!(matches!(None::<i32>.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }
}

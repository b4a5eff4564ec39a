//! Unified error handling.
//!
//! Provides a unified `AppError` type for route handlers that fall outside
//! the redirect-with-flash form flows. All such handlers return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use chefclash_core::eligibility::RegistrationError;

use crate::backend::BackendError;
use crate::services::auth::AuthError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Registration precondition violated.
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Viewer is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Backend(err) => match err {
                BackendError::Rejected { status: 404, .. } => StatusCode::NOT_FOUND,
                BackendError::Rejected { status: 401 | 403, .. } => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(_) | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Registration(err) => match err {
                RegistrationError::NotPermitted => StatusCode::FORBIDDEN,
                _ => StatusCode::BAD_REQUEST,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Surface backend-supplied messages verbatim; hide internals.
        let message = match &self {
            Self::Backend(err) => match err {
                BackendError::Rejected { message, .. } => message.clone(),
                _ => "External service error".to_string(),
            },
            Self::Auth(err) => match err {
                AuthError::MissingToken => err.to_string(),
                AuthError::Backend(BackendError::Rejected { message, .. }) => message.clone(),
                AuthError::Backend(_) => "External service error".to_string(),
            },
            Self::Registration(err) => err.to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("tournament 123".to_string());
        assert_eq!(err.to_string(), "Not found: tournament 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Registration(RegistrationError::NotPermitted)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::Registration(
                RegistrationError::SelectionRequired
            )),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_backend_rejection_maps_status_and_message() {
        let err = AppError::Backend(BackendError::Rejected {
            status: 404,
            message: "Tournament not found".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

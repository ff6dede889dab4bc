//! CAPTCHA Error Types
//!
//! This module provides CAPTCHA-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// CAPTCHA-specific result type alias
pub type CaptchaResult<T> = Result<T, CaptchaError>;

/// CAPTCHA-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status codes
/// and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Challenge key does not resolve to any challenge
    #[error("CAPTCHA challenge not found")]
    ChallengeNotFound,

    /// Challenge was already consumed (verified, failed out, or superseded)
    #[error("CAPTCHA challenge already used")]
    ChallengeConsumed,

    /// Challenge TTL has elapsed
    #[error("CAPTCHA challenge expired")]
    ChallengeExpired,

    /// Supplied answer does not match
    #[error("Incorrect CAPTCHA answer")]
    InvalidAnswer,

    /// Optimistic concurrency conflict (version mismatch on update)
    #[error("Challenge was modified concurrently")]
    ConcurrentUpdate,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CaptchaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CaptchaError::ChallengeNotFound
            | CaptchaError::ChallengeConsumed
            | CaptchaError::ChallengeExpired => StatusCode::GONE,
            CaptchaError::InvalidAnswer => StatusCode::BAD_REQUEST,
            CaptchaError::ConcurrentUpdate => StatusCode::CONFLICT,
            CaptchaError::Database(_) | CaptchaError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptchaError::ChallengeNotFound
            | CaptchaError::ChallengeConsumed
            | CaptchaError::ChallengeExpired => ErrorKind::Gone,
            CaptchaError::InvalidAnswer => ErrorKind::BadRequest,
            CaptchaError::ConcurrentUpdate => ErrorKind::Conflict,
            CaptchaError::Database(_) | CaptchaError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CaptchaError::Database(e) => {
                tracing::error!(error = %e, "CAPTCHA database error");
            }
            CaptchaError::Internal(msg) => {
                tracing::error!(message = %msg, "CAPTCHA internal error");
            }
            CaptchaError::InvalidAnswer => {
                tracing::warn!("CAPTCHA wrong answer");
            }
            CaptchaError::ConcurrentUpdate => {
                tracing::warn!("CAPTCHA concurrent update conflict");
            }
            _ => {
                tracing::debug!(error = %self, "CAPTCHA error");
            }
        }
    }
}

impl From<CaptchaError> for AppError {
    fn from(err: CaptchaError) -> Self {
        let kind = err.kind();
        // Never leak database/internal detail to the client
        let message = if kind.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };
        AppError::new(kind, message)
    }
}

impl IntoResponse for CaptchaError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Authentication failures carry deliberately non-enumerating messages:
//! an unknown username and a wrong password answer identically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown account or wrong password (indistinguishable on purpose)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Account was soft-deleted
    #[error("User account is deleted")]
    AccountDeleted,

    /// Account is locked out after too many failed attempts
    #[error("User account is locked")]
    AccountLocked,

    /// Phone+password login attempted without a solved CAPTCHA
    #[error("CAPTCHA verification required")]
    CaptchaRequired,

    /// SMS verification code missing, wrong, expired, or consumed
    #[error("Invalid verification code")]
    InvalidVerificationCode,

    /// User referenced by a token or code no longer resolves
    #[error("User not found")]
    UserNotFound,

    /// Claims lookup for an id that is missing or soft-deleted
    #[error("User not found")]
    ClaimsNotFound,

    /// Refresh token does not exist for this user
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    /// Refresh token was rotated or explicitly revoked
    #[error("Refresh token has been revoked")]
    RefreshTokenRevoked,

    /// Refresh token TTL elapsed
    #[error("Refresh token has expired")]
    RefreshTokenExpired,

    /// Bearer token failed signature/issuer/audience/expiry validation
    #[error("Invalid or expired access token")]
    InvalidAccessToken,

    /// No bearer token on a protected route
    #[error("Missing authorization header")]
    MissingAuthHeader,

    /// Optimistic concurrency conflict (version mismatch on update)
    #[error("Resource was modified concurrently")]
    ConcurrentUpdate,

    /// Access token could not be signed
    #[error("Token encoding error: {0}")]
    TokenEncoding(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::AccountDeleted
            | AuthError::AccountLocked
            | AuthError::CaptchaRequired
            | AuthError::InvalidVerificationCode
            | AuthError::UserNotFound
            | AuthError::RefreshTokenNotFound
            | AuthError::RefreshTokenRevoked
            | AuthError::RefreshTokenExpired
            | AuthError::InvalidAccessToken
            | AuthError::MissingAuthHeader => StatusCode::UNAUTHORIZED,
            AuthError::ClaimsNotFound => StatusCode::NOT_FOUND,
            AuthError::ConcurrentUpdate => StatusCode::CONFLICT,
            AuthError::TokenEncoding(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::AccountDeleted
            | AuthError::AccountLocked
            | AuthError::CaptchaRequired
            | AuthError::InvalidVerificationCode
            | AuthError::UserNotFound
            | AuthError::RefreshTokenNotFound
            | AuthError::RefreshTokenRevoked
            | AuthError::RefreshTokenExpired
            | AuthError::InvalidAccessToken
            | AuthError::MissingAuthHeader => ErrorKind::Unauthorized,
            AuthError::ClaimsNotFound => ErrorKind::NotFound,
            AuthError::ConcurrentUpdate => ErrorKind::Conflict,
            AuthError::TokenEncoding(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError, hiding server-side detail
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        let message = if kind.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        AppError::new(kind, message)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::TokenEncoding(msg) => {
                tracing::error!(message = %msg, "Access token encoding failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            AuthError::RefreshTokenRevoked => {
                tracing::warn!("Refresh attempt with a revoked token");
            }
            AuthError::ConcurrentUpdate => {
                tracing::warn!("Auth concurrent update conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

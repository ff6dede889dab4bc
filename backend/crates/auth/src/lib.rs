//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Login with username + password, phone + password + CAPTCHA, or phone + SMS code
//! - JWT access tokens (HMAC-SHA-256) carrying roles and permissions
//! - Refresh tokens with mandatory rotation and revocation
//! - Automatic lockout after failed login attempts
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Refresh tokens are opaque 64-byte random values, single-use
//! - Failed logins and lockouts are tracked per account with optimistic
//!   concurrency so concurrent attempts never lose an increment
//! - Authentication failures answer with safe, non-enumerating messages

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenIssuer;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use infra::sms::LogSmsNotifier;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

//! CAPTCHA Challenge Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Security Model
//! - Challenges are simple arithmetic questions looked up by an opaque
//!   128-bit random key; the answer never leaves the backend
//! - A challenge is single-use: success, expiry, or three wrong answers
//!   all consume it permanently
//! - Creating a new challenge for a phone invalidates prior outstanding ones

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CaptchaConfig;
pub use error::{CaptchaError, CaptchaResult};
pub use infra::postgres::PgCaptchaRepository;
pub use presentation::router::{captcha_router, captcha_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;

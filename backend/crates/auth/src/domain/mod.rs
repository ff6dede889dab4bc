//! Domain Layer
//!
//! Contains entities, value objects, repository traits, and the SMS port.

pub mod entity;
pub mod notifier;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    refresh_token::RefreshToken, user::User, verification_code::VerificationCode,
};
pub use repository::{
    CaptchaGate, RefreshTokenRepository, UserRepository, VerificationCodeRepository,
};

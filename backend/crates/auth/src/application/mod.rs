//! Application Layer
//!
//! Use cases and application services.

pub mod claims;
pub mod config;
pub mod login;
pub mod refresh;
pub mod revoke;
pub mod token;
pub mod verification_code;

// Re-exports
pub use claims::UserClaimsUseCase;
pub use config::AuthConfig;
pub use login::{LoginOutput, LoginUseCase, UserSummary};
pub use refresh::{RefreshOutput, RefreshTokenUseCase};
pub use revoke::RevokeTokenUseCase;
pub use token::{Claims, TokenIssuer};
pub use verification_code::{GenerateCodeOutput, GenerateCodeUseCase, VerifyCodeUseCase};

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in the infra layer.
//!
//! Mutating methods take `&mut` entities: a successful update bumps the
//! entity's version counter so a use case can persist the same row twice
//! within one request (lock clear followed by failure increment).

use chrono::{DateTime, Utc};

use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::entity::user::User;
use crate::domain::entity::verification_code::VerificationCode;
use crate::domain::value_object::CodeType;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_by_id(&self, user_id: i64) -> AuthResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Find user by phone number
    async fn find_by_phone(&self, phone: &str) -> AuthResult<Option<User>>;

    /// Persist mutated user state (lockout counters, last login)
    async fn update(&self, user: &mut User) -> AuthResult<()>;

    /// Role codes held by the user
    async fn get_roles(&self, user_id: i64) -> AuthResult<Vec<String>>;

    /// Permission codes resolved through the user's roles
    async fn get_permissions(&self, user_id: i64) -> AuthResult<Vec<String>>;

    /// Additional stored claims as (type, value) pairs
    async fn get_extra_claims(&self, user_id: i64) -> AuthResult<Vec<(String, String)>>;
}

/// Refresh token repository trait
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    /// Insert a new refresh token
    async fn create(&self, token: &RefreshToken) -> AuthResult<()>;

    /// Look up by token value scoped to a user (refresh path)
    async fn find_by_token_and_user(
        &self,
        token: &str,
        user_id: i64,
    ) -> AuthResult<Option<RefreshToken>>;

    /// Look up by token value alone (logout path)
    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RefreshToken>>;

    /// Persist mutated token state (revocation)
    async fn update(&self, token: &mut RefreshToken) -> AuthResult<()>;

    /// Atomically persist a rotation: update the revoked old token and
    /// insert the new one in a single transaction
    async fn rotate(&self, old: &mut RefreshToken, new: &RefreshToken) -> AuthResult<()>;
}

/// Verification code repository trait
#[trait_variant::make(VerificationCodeRepository: Send)]
pub trait LocalVerificationCodeRepository {
    /// Insert a new verification code
    async fn create(&self, code: &VerificationCode) -> AuthResult<()>;

    /// Consume all outstanding codes for (phone, type); returns the count
    async fn invalidate_outstanding(&self, phone: &str, code_type: CodeType) -> AuthResult<u64>;

    /// Newest unconsumed, unexpired code for (phone, type)
    async fn find_newest_valid(
        &self,
        phone: &str,
        code_type: CodeType,
    ) -> AuthResult<Option<VerificationCode>>;

    /// Persist mutated code state (attempt counter, consumption)
    async fn update(&self, code: &mut VerificationCode) -> AuthResult<()>;
}

/// Solved CAPTCHA challenge as seen by the login gate
#[derive(Debug, Clone)]
pub struct VerifiedChallenge {
    pub key: String,
    /// Phone the challenge was bound to at creation, if any
    pub phone: Option<String>,
    pub verified_at: DateTime<Utc>,
}

/// Read-only gate over the CAPTCHA store for phone+password login
#[trait_variant::make(CaptchaGate: Send)]
pub trait LocalCaptchaGate {
    /// Look up a successfully solved, unsuperseded challenge by key
    async fn find_verified_challenge(&self, key: &str) -> AuthResult<Option<VerifiedChallenge>>;
}

//! Revoke Token Use Case (logout)
//!
//! Idempotent: an unknown token is a no-op signalled by `false`, an
//! already revoked token reports success.

use std::sync::Arc;

use crate::domain::entity::refresh_token::REVOKE_REASON_LOGOUT;
use crate::domain::repository::RefreshTokenRepository;
use crate::error::AuthResult;

/// Revoke token use case
pub struct RevokeTokenUseCase<T>
where
    T: RefreshTokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> RevokeTokenUseCase<T>
where
    T: RefreshTokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    /// Revoke a refresh token; returns whether a token was (or already
    /// had been) revoked
    pub async fn execute(&self, token: &str, reason: Option<&str>) -> AuthResult<bool> {
        let Some(mut refresh_token) = self.token_repo.find_by_token(token).await? else {
            return Ok(false);
        };

        if refresh_token.is_revoked() {
            return Ok(true);
        }

        refresh_token.revoke(reason.unwrap_or(REVOKE_REASON_LOGOUT));
        self.token_repo.update(&mut refresh_token).await?;

        tracing::info!(user_id = refresh_token.user_id, "Refresh token revoked");

        Ok(true)
    }
}

//! Refresh Token Use Case
//!
//! Exchanges a refresh token for a new access + refresh token pair.
//! Rotation is mandatory: the old token is revoked with reason
//! "Refresh token rotated" and the new one inserted atomically, so a
//! reused token always fails at the revocation check.

use std::sync::Arc;

use platform::client::ClientContext;
use platform::crypto::random_token;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::entity::refresh_token::{REVOKE_REASON_ROTATED, RefreshToken};
use crate::domain::repository::{RefreshTokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug, Clone)]
pub struct RefreshOutput {
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, T> RefreshTokenUseCase<U, T>
where
    U: UserRepository,
    T: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<T>,
        issuer: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            issuer,
            config,
        }
    }

    pub async fn execute(
        &self,
        refresh_token: &str,
        user_id: i64,
        client: &ClientContext,
    ) -> AuthResult<RefreshOutput> {
        let mut old = self
            .token_repo
            .find_by_token_and_user(refresh_token, user_id)
            .await?
            .ok_or(AuthError::RefreshTokenNotFound)?;

        if old.is_revoked() {
            return Err(AuthError::RefreshTokenRevoked);
        }
        if old.is_expired() {
            return Err(AuthError::RefreshTokenExpired);
        }

        let user = self
            .user_repo
            .find_by_id(old.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.is_deleted() {
            return Err(AuthError::UserNotFound);
        }

        let roles = self.user_repo.get_roles(user.id).await?;
        let permissions = self.user_repo.get_permissions(user.id).await?;
        let access_token = self.issuer.issue(&user, &roles, &permissions)?;

        let token_value = random_token(RefreshToken::TOKEN_BYTES);
        let new = RefreshToken::new(
            user.id,
            user.organization_id,
            token_value.clone(),
            self.config.refresh_token_ttl_chrono(),
            client.ip_string(),
            client.user_agent.clone(),
        );

        old.revoke(REVOKE_REASON_ROTATED);
        self.token_repo.rotate(&mut old, &new).await?;

        tracing::info!(user_id = user.id, "Refresh token rotated");

        Ok(RefreshOutput {
            access_token,
            refresh_token: token_value,
        })
    }
}

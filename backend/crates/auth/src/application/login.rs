//! Login Use Case
//!
//! Three entry points share one issuance path:
//! - `with_username` - username + password
//! - `with_phone_password` - phone + password, gated on a solved CAPTCHA
//! - `with_sms_code` - phone + SMS verification code

use std::sync::Arc;

use platform::client::ClientContext;
use platform::crypto::random_token;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::verification_code::VerifyCodeUseCase;
use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::entity::user::User;
use crate::domain::repository::{
    CaptchaGate, RefreshTokenRepository, UserRepository, VerificationCodeRepository,
};
use crate::domain::value_object::{CodeType, LoginMethod};
use crate::error::{AuthError, AuthResult};

/// User summary included in every login response
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub phone: Option<String>,
    pub organization_id: Option<i64>,
    pub user_type: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserSummary,
}

/// Login use case
pub struct LoginUseCase<U, T, G, V>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    G: CaptchaGate,
    V: VerificationCodeRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    captcha_gate: Arc<G>,
    code_repo: Arc<V>,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<U, T, G, V> LoginUseCase<U, T, G, V>
where
    U: UserRepository,
    T: RefreshTokenRepository,
    G: CaptchaGate,
    V: VerificationCodeRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        token_repo: Arc<T>,
        captcha_gate: Arc<G>,
        code_repo: Arc<V>,
        issuer: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            token_repo,
            captcha_gate,
            code_repo,
            issuer,
            config,
        }
    }

    /// Login with username + password
    pub async fn with_username(
        &self,
        username: &str,
        password: &str,
        client: &ClientContext,
    ) -> AuthResult<LoginOutput> {
        let mut user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.check_account(&mut user).await?;
        self.verify_password(&mut user, password).await?;

        self.issue_for_user(user, LoginMethod::Password, client)
            .await
    }

    /// Login with phone + password, gated on a previously solved CAPTCHA
    pub async fn with_phone_password(
        &self,
        phone: &str,
        password: &str,
        captcha_key: &str,
        client: &ClientContext,
    ) -> AuthResult<LoginOutput> {
        // Gate before touching the credential store
        let challenge = self
            .captcha_gate
            .find_verified_challenge(captcha_key)
            .await?
            .ok_or(AuthError::CaptchaRequired)?;

        // A challenge bound to a phone only admits that phone
        if let Some(bound) = challenge.phone.as_deref() {
            if bound != phone {
                tracing::warn!("CAPTCHA phone binding mismatch on login");
                return Err(AuthError::CaptchaRequired);
            }
        }

        let mut user = self
            .user_repo
            .find_by_phone(phone)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        self.check_account(&mut user).await?;
        self.verify_password(&mut user, password).await?;

        self.issue_for_user(user, LoginMethod::Password, client)
            .await
    }

    /// Login with phone + SMS verification code
    pub async fn with_sms_code(
        &self,
        phone: &str,
        code: &str,
        client: &ClientContext,
    ) -> AuthResult<LoginOutput> {
        let verify = VerifyCodeUseCase::new(self.code_repo.clone());
        verify.execute(phone, code, CodeType::Login).await?;

        let mut user = self
            .user_repo
            .find_by_phone(phone)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_deleted() {
            return Err(AuthError::AccountDeleted);
        }

        if user.clear_expired_lock() {
            self.user_repo.update(&mut user).await?;
        }
        if user.is_locked() {
            return Err(AuthError::AccountLocked);
        }

        self.issue_for_user(user, LoginMethod::Sms, client).await
    }

    /// Deleted and lockout checks shared by the password logins
    async fn check_account(&self, user: &mut User) -> AuthResult<()> {
        if user.is_deleted() {
            return Err(AuthError::AccountDeleted);
        }

        // An elapsed lockout clears before the password is checked
        if user.clear_expired_lock() {
            self.user_repo.update(user).await?;
        }

        if user.is_locked() {
            return Err(AuthError::AccountLocked);
        }

        Ok(())
    }

    /// Verify the password, recording the failure on mismatch
    async fn verify_password(&self, user: &mut User, password: &str) -> AuthResult<()> {
        let hashed = HashedPassword::from_phc_string(&user.password_hash)
            .map_err(|e| AuthError::Internal(format!("Stored hash unreadable: {}", e)))?;

        // A password failing the input policy can never match a stored hash
        let matches = match ClearTextPassword::new(password.to_string()) {
            Ok(clear) => hashed.verify(&clear, self.config.pepper()),
            Err(_) => false,
        };

        if !matches {
            user.record_failed_login();
            self.user_repo.update(user).await?;
            tracing::warn!(
                failed_attempts = user.failed_login_attempts,
                "Password mismatch"
            );
            return Err(AuthError::InvalidCredentials);
        }

        Ok(())
    }

    /// Record the login and issue the access + refresh token pair
    async fn issue_for_user(
        &self,
        mut user: User,
        method: LoginMethod,
        client: &ClientContext,
    ) -> AuthResult<LoginOutput> {
        user.record_login(client.ip_string(), method);
        self.user_repo.update(&mut user).await?;

        let roles = self.user_repo.get_roles(user.id).await?;
        let permissions = self.user_repo.get_permissions(user.id).await?;

        let access_token = self.issuer.issue(&user, &roles, &permissions)?;

        let token_value = random_token(RefreshToken::TOKEN_BYTES);
        let refresh_token = RefreshToken::new(
            user.id,
            user.organization_id,
            token_value.clone(),
            self.config.refresh_token_ttl_chrono(),
            client.ip_string(),
            client.user_agent.clone(),
        );
        self.token_repo.create(&refresh_token).await?;

        tracing::info!(
            user_id = user.id,
            method = method.as_str(),
            "User logged in"
        );

        Ok(LoginOutput {
            access_token,
            refresh_token: token_value,
            user: UserSummary {
                id: user.id,
                username: user.username,
                phone: user.phone,
                organization_id: user.organization_id,
                user_type: user.user_type,
                roles,
                permissions,
            },
        })
    }
}

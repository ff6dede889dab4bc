//! Verification Code Manager
//!
//! Generation and verification of SMS login codes. A code is single-use
//! and a new one supersedes any outstanding code for the same
//! (phone, type) pair.

use std::sync::Arc;

use platform::crypto::random_numeric_code;

use crate::application::config::AuthConfig;
use crate::domain::entity::verification_code::VerificationCode;
use crate::domain::notifier::SmsNotifier;
use crate::domain::repository::VerificationCodeRepository;
use crate::domain::value_object::CodeType;
use crate::error::{AuthError, AuthResult};

/// Output of code generation
#[derive(Debug, Clone)]
pub struct GenerateCodeOutput {
    /// The generated code; for testing and server-side logging only,
    /// never returned to the end client
    pub code: String,
    pub expires_in_secs: i64,
}

/// Generate code use case
pub struct GenerateCodeUseCase<V, N>
where
    V: VerificationCodeRepository,
    N: SmsNotifier + Send + Sync + 'static,
{
    code_repo: Arc<V>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
}

impl<V, N> GenerateCodeUseCase<V, N>
where
    V: VerificationCodeRepository,
    N: SmsNotifier + Send + Sync + 'static,
{
    pub fn new(code_repo: Arc<V>, notifier: Arc<N>, config: Arc<AuthConfig>) -> Self {
        Self {
            code_repo,
            notifier,
            config,
        }
    }

    pub async fn execute(
        &self,
        phone: &str,
        code_type: CodeType,
        user_id: Option<i64>,
    ) -> AuthResult<GenerateCodeOutput> {
        let superseded = self
            .code_repo
            .invalidate_outstanding(phone, code_type)
            .await?;
        if superseded > 0 {
            tracing::debug!(superseded, "Superseded outstanding verification codes");
        }

        let code = random_numeric_code(VerificationCode::CODE_LENGTH);
        let entity = VerificationCode::new(
            phone.to_string(),
            user_id,
            code.clone(),
            code_type,
            self.config.verification_code_ttl_chrono(),
        );
        self.code_repo.create(&entity).await?;

        // Fire-and-forget dispatch; the request never waits for delivery
        let notifier = self.notifier.clone();
        let phone_owned = phone.to_string();
        let code_owned = code.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier
                .send_verification_code(&phone_owned, &code_owned)
                .await
            {
                tracing::error!(error = %e, "SMS dispatch failed");
            }
        });

        tracing::info!(code_type = code_type.as_str(), "Verification code generated");

        Ok(GenerateCodeOutput {
            code,
            expires_in_secs: self.config.verification_code_ttl_secs(),
        })
    }
}

/// Verify code use case
pub struct VerifyCodeUseCase<V>
where
    V: VerificationCodeRepository,
{
    code_repo: Arc<V>,
}

impl<V> VerifyCodeUseCase<V>
where
    V: VerificationCodeRepository,
{
    pub fn new(code_repo: Arc<V>) -> Self {
        Self { code_repo }
    }

    /// Check a supplied code against the newest valid one for the phone
    ///
    /// Every outcome persists before returning: a mismatch bumps the
    /// attempt counter (the third one force-consumes the code), a match
    /// consumes it.
    pub async fn execute(&self, phone: &str, code: &str, code_type: CodeType) -> AuthResult<()> {
        let mut stored = self
            .code_repo
            .find_newest_valid(phone, code_type)
            .await?
            .ok_or(AuthError::InvalidVerificationCode)?;

        if stored.code != code {
            stored.record_mismatch();
            self.code_repo.update(&mut stored).await?;
            tracing::warn!(
                attempt_count = stored.attempt_count,
                "Verification code mismatch"
            );
            return Err(AuthError::InvalidVerificationCode);
        }

        stored.consume();
        self.code_repo.update(&mut stored).await?;

        Ok(())
    }
}

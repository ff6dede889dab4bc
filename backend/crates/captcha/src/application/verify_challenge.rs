//! Verify Challenge Use Case

use std::sync::Arc;

use crate::domain::repository::ChallengeRepository;
use crate::domain::services::answers_match;
use crate::error::{CaptchaError, CaptchaResult};

/// Verify Challenge Use Case
///
/// Every outcome is persisted before returning: expiry and the failure
/// threshold consume the challenge, a correct answer marks it verified.
pub struct VerifyChallengeUseCase<R>
where
    R: ChallengeRepository,
{
    repo: Arc<R>,
}

impl<R> VerifyChallengeUseCase<R>
where
    R: ChallengeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, key: &str, answer: &str) -> CaptchaResult<()> {
        let mut challenge = self
            .repo
            .find_by_key(key)
            .await?
            .ok_or(CaptchaError::ChallengeNotFound)?;

        if challenge.is_consumed() {
            return Err(CaptchaError::ChallengeConsumed);
        }

        if challenge.is_expired() {
            challenge.invalidate();
            self.repo.update(&challenge).await?;
            return Err(CaptchaError::ChallengeExpired);
        }

        if !answers_match(&challenge.answer, answer) {
            challenge.record_failure();
            self.repo.update(&challenge).await?;
            tracing::warn!(
                challenge_key = %key,
                failed_attempts = challenge.failed_attempts,
                "CAPTCHA wrong answer"
            );
            return Err(CaptchaError::InvalidAnswer);
        }

        challenge.mark_verified();
        self.repo.update(&challenge).await?;

        tracing::info!(challenge_key = %key, "CAPTCHA verified");
        Ok(())
    }
}

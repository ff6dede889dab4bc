//! Create Challenge Use Case

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::crypto::random_key_hex;

use crate::application::config::CaptchaConfig;
use crate::domain::entities::CaptchaChallenge;
use crate::domain::repository::ChallengeRepository;
use crate::domain::services::generate_math_challenge;
use crate::error::CaptchaResult;

/// Input DTO for create challenge
#[derive(Debug, Clone, Default)]
pub struct CreateChallengeInput {
    /// Phone the challenge should be bound to; also invalidates prior
    /// outstanding challenges for that phone
    pub phone: Option<String>,
    pub client_ip: Option<String>,
}

/// Output DTO for create challenge
#[derive(Debug, Clone)]
pub struct CreateChallengeOutput {
    pub key: String,
    pub question: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in_secs: i64,
}

/// Create Challenge Use Case
pub struct CreateChallengeUseCase<R>
where
    R: ChallengeRepository,
{
    repo: Arc<R>,
    config: Arc<CaptchaConfig>,
}

impl<R> CreateChallengeUseCase<R>
where
    R: ChallengeRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CaptchaConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: CreateChallengeInput) -> CaptchaResult<CreateChallengeOutput> {
        // A new challenge supersedes any outstanding ones for the phone
        if let Some(phone) = input.phone.as_deref() {
            let superseded = self.repo.invalidate_outstanding(phone).await?;
            if superseded > 0 {
                tracing::debug!(superseded, "Superseded outstanding CAPTCHA challenges");
            }
        }

        let math = generate_math_challenge(&mut rand::thread_rng());
        let key = random_key_hex(self.config.key_len_bytes);

        let challenge = CaptchaChallenge::new(
            key.clone(),
            math.question.clone(),
            math.answer.to_string(),
            input.phone,
            input.client_ip,
            chrono::Duration::seconds(self.config.challenge_ttl_secs()),
        );

        self.repo.create(&challenge).await?;

        tracing::info!(challenge_key = %key, "CAPTCHA challenge created");

        Ok(CreateChallengeOutput {
            key,
            question: math.question,
            expires_at: challenge.expires_at,
            expires_in_secs: self.config.challenge_ttl_secs(),
        })
    }
}

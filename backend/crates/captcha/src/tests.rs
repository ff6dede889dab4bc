//! Unit tests for the CAPTCHA crate

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use crate::application::config::CaptchaConfig;
use crate::application::create_challenge::{CreateChallengeInput, CreateChallengeUseCase};
use crate::application::verify_challenge::VerifyChallengeUseCase;
use crate::domain::entities::{CaptchaChallenge, MAX_FAILED_ATTEMPTS};
use crate::domain::repository::ChallengeRepository;
use crate::error::{CaptchaError, CaptchaResult};

/// In-memory repository for use-case tests
#[derive(Clone, Default)]
struct InMemoryChallengeRepo {
    challenges: Arc<Mutex<Vec<CaptchaChallenge>>>,
}

impl InMemoryChallengeRepo {
    fn stored_answer(&self, key: &str) -> String {
        let challenges = self.challenges.lock().unwrap();
        challenges
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.answer.clone())
            .expect("challenge exists")
    }

    fn stored(&self, key: &str) -> CaptchaChallenge {
        let challenges = self.challenges.lock().unwrap();
        challenges
            .iter()
            .find(|c| c.key == key)
            .cloned()
            .expect("challenge exists")
    }
}

impl ChallengeRepository for InMemoryChallengeRepo {
    async fn create(&self, challenge: &CaptchaChallenge) -> CaptchaResult<()> {
        let mut challenges = self.challenges.lock().unwrap();
        let mut stored = challenge.clone();
        stored.id = challenges.len() as i64 + 1;
        challenges.push(stored);
        Ok(())
    }

    async fn find_by_key(&self, key: &str) -> CaptchaResult<Option<CaptchaChallenge>> {
        let challenges = self.challenges.lock().unwrap();
        Ok(challenges.iter().find(|c| c.key == key).cloned())
    }

    async fn update(&self, challenge: &CaptchaChallenge) -> CaptchaResult<()> {
        let mut challenges = self.challenges.lock().unwrap();
        let existing = challenges
            .iter_mut()
            .find(|c| c.id == challenge.id && c.version == challenge.version)
            .ok_or(CaptchaError::ConcurrentUpdate)?;
        *existing = challenge.clone();
        existing.version += 1;
        Ok(())
    }

    async fn invalidate_outstanding(&self, phone: &str) -> CaptchaResult<u64> {
        let mut challenges = self.challenges.lock().unwrap();
        let mut count = 0;
        for c in challenges.iter_mut() {
            if c.phone.as_deref() == Some(phone) && !c.is_consumed() {
                c.invalidated_at = Some(Utc::now());
                c.version += 1;
                count += 1;
            }
        }
        Ok(count)
    }
}

fn test_setup() -> (
    Arc<InMemoryChallengeRepo>,
    CreateChallengeUseCase<InMemoryChallengeRepo>,
    VerifyChallengeUseCase<InMemoryChallengeRepo>,
) {
    let repo = Arc::new(InMemoryChallengeRepo::default());
    let config = Arc::new(CaptchaConfig::default());
    let create = CreateChallengeUseCase::new(repo.clone(), config);
    let verify = VerifyChallengeUseCase::new(repo.clone());
    (repo, create, verify)
}

mod entity_tests {
    use super::*;

    #[test]
    fn new_challenge_starts_unconsumed() {
        let challenge = CaptchaChallenge::new(
            "abc123".to_string(),
            "3 + 5".to_string(),
            "8".to_string(),
            Some("13800138000".to_string()),
            None,
            Duration::seconds(300),
        );

        assert!(!challenge.is_expired());
        assert!(!challenge.is_consumed());
        assert!(!challenge.is_verified());
        assert_eq!(challenge.failed_attempts, 0);
        assert_eq!(challenge.version, 0);
    }

    #[test]
    fn third_failure_invalidates_permanently() {
        let mut challenge = CaptchaChallenge::new(
            "abc123".to_string(),
            "3 + 5".to_string(),
            "8".to_string(),
            None,
            None,
            Duration::seconds(300),
        );

        challenge.record_failure();
        challenge.record_failure();
        assert!(!challenge.is_consumed());

        challenge.record_failure();
        assert_eq!(challenge.failed_attempts, MAX_FAILED_ATTEMPTS);
        assert!(challenge.is_consumed());
        assert!(!challenge.is_verified());
    }

    #[test]
    fn mark_verified_counts_as_solved() {
        let mut challenge = CaptchaChallenge::new(
            "abc123".to_string(),
            "3 + 5".to_string(),
            "8".to_string(),
            None,
            None,
            Duration::seconds(300),
        );

        challenge.mark_verified();
        assert!(challenge.is_consumed());
        assert!(challenge.is_verified());
    }

    #[test]
    fn expired_challenge_detected() {
        let mut challenge = CaptchaChallenge::new(
            "abc123".to_string(),
            "3 + 5".to_string(),
            "8".to_string(),
            None,
            None,
            Duration::seconds(300),
        );
        challenge.expires_at = Utc::now() - Duration::seconds(1);

        assert!(challenge.is_expired());
    }
}

mod use_case_tests {
    use super::*;

    #[tokio::test]
    async fn create_returns_key_and_question() {
        let (_repo, create, _verify) = test_setup();

        let output = create
            .execute(CreateChallengeInput::default())
            .await
            .unwrap();

        // 16 random bytes hex-encoded
        assert_eq!(output.key.len(), 32);
        assert!(output.question.contains('+') || output.question.contains('-'));
        assert_eq!(output.expires_in_secs, 300);
    }

    #[tokio::test]
    async fn create_supersedes_outstanding_for_phone() {
        let (repo, create, _verify) = test_setup();
        let phone = "13800138000";

        let first = create
            .execute(CreateChallengeInput {
                phone: Some(phone.to_string()),
                client_ip: None,
            })
            .await
            .unwrap();

        let second = create
            .execute(CreateChallengeInput {
                phone: Some(phone.to_string()),
                client_ip: None,
            })
            .await
            .unwrap();

        assert!(repo.stored(&first.key).is_consumed());
        assert!(!repo.stored(&second.key).is_consumed());
    }

    #[tokio::test]
    async fn correct_answer_verifies_and_consumes() {
        let (repo, create, verify) = test_setup();

        let output = create
            .execute(CreateChallengeInput::default())
            .await
            .unwrap();
        let answer = repo.stored_answer(&output.key);

        verify.execute(&output.key, &answer).await.unwrap();
        assert!(repo.stored(&output.key).is_verified());

        // Single-use: the second verification must fail
        let result = verify.execute(&output.key, &answer).await;
        assert!(matches!(result, Err(CaptchaError::ChallengeConsumed)));
    }

    #[tokio::test]
    async fn answer_comparison_tolerates_whitespace() {
        let (repo, create, verify) = test_setup();

        let output = create
            .execute(CreateChallengeInput::default())
            .await
            .unwrap();
        let answer = format!("  {}  ", repo.stored_answer(&output.key));

        verify.execute(&output.key, &answer).await.unwrap();
    }

    #[tokio::test]
    async fn three_wrong_answers_invalidate_permanently() {
        let (repo, create, verify) = test_setup();

        let output = create
            .execute(CreateChallengeInput::default())
            .await
            .unwrap();
        let answer = repo.stored_answer(&output.key);

        // "999" can never be a correct answer (max is 18)
        for _ in 0..3 {
            let result = verify.execute(&output.key, "999").await;
            assert!(matches!(
                result,
                Err(CaptchaError::InvalidAnswer) | Err(CaptchaError::ChallengeConsumed)
            ));
        }

        // Even the correct answer fails now
        let result = verify.execute(&output.key, &answer).await;
        assert!(matches!(result, Err(CaptchaError::ChallengeConsumed)));
    }

    #[tokio::test]
    async fn expired_challenge_is_consumed_on_verify() {
        let (repo, create, verify) = test_setup();

        let output = create
            .execute(CreateChallengeInput::default())
            .await
            .unwrap();
        let answer = repo.stored_answer(&output.key);

        {
            let mut challenges = repo.challenges.lock().unwrap();
            let challenge = challenges
                .iter_mut()
                .find(|c| c.key == output.key)
                .unwrap();
            challenge.expires_at = Utc::now() - Duration::seconds(1);
        }

        let result = verify.execute(&output.key, &answer).await;
        assert!(matches!(result, Err(CaptchaError::ChallengeExpired)));
        assert!(repo.stored(&output.key).is_consumed());

        let result = verify.execute(&output.key, &answer).await;
        assert!(matches!(result, Err(CaptchaError::ChallengeConsumed)));
    }

    #[tokio::test]
    async fn unknown_key_fails() {
        let (_repo, _create, verify) = test_setup();

        let result = verify.execute("no-such-key", "8").await;
        assert!(matches!(result, Err(CaptchaError::ChallengeNotFound)));
    }
}

mod config_tests {
    use super::*;
    use std::time::Duration as StdDuration;

    #[test]
    fn default_config() {
        let config = CaptchaConfig::default();

        assert_eq!(config.challenge_ttl, StdDuration::from_secs(300));
        assert_eq!(config.key_len_bytes, 16);
        assert_eq!(config.challenge_ttl_secs(), 300);
    }
}

mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn challenge_response_serializes_camel_case() {
        let response = CaptchaChallengeResponse {
            success: true,
            challenge_key: "abc123".to_string(),
            challenge: "3 + 5".to_string(),
            expires_in: 300,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["challengeKey"], "abc123");
        assert_eq!(json["challenge"], "3 + 5");
        assert_eq!(json["expiresIn"], 300);
    }

    #[test]
    fn verify_request_deserializes_camel_case() {
        let json = r#"{"challengeKey":"abc123","answer":"8"}"#;
        let request: VerifyCaptchaRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.challenge_key, "abc123");
        assert_eq!(request.answer, "8");
    }
}

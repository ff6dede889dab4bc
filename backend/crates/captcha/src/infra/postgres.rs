//! PostgreSQL Repository Implementations

use chrono::Utc;
use sqlx::PgPool;

use crate::domain::entities::CaptchaChallenge;
use crate::domain::repository::ChallengeRepository;
use crate::domain::value_objects::ChallengeKind;
use crate::error::{CaptchaError, CaptchaResult};

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgCaptchaRepository {
    pool: PgPool,
}

impl PgCaptchaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete challenges whose TTL elapsed
    pub async fn cleanup_expired(&self) -> CaptchaResult<u64> {
        let deleted = sqlx::query("DELETE FROM captcha_challenges WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(challenges = deleted, "Cleaned up expired CAPTCHA challenges");

        Ok(deleted)
    }
}

impl ChallengeRepository for PgCaptchaRepository {
    async fn create(&self, challenge: &CaptchaChallenge) -> CaptchaResult<()> {
        sqlx::query(
            r#"
            INSERT INTO captcha_challenges (
                challenge_key,
                question,
                answer,
                challenge_kind,
                phone,
                client_ip,
                expires_at,
                failed_attempts,
                created_at,
                version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&challenge.key)
        .bind(&challenge.question)
        .bind(&challenge.answer)
        .bind(challenge.kind.as_str())
        .bind(&challenge.phone)
        .bind(&challenge.client_ip)
        .bind(challenge.expires_at)
        .bind(challenge.failed_attempts)
        .bind(challenge.created_at)
        .bind(challenge.version)
        .execute(&self.pool)
        .await?;

        tracing::debug!(challenge_key = %challenge.key, "Challenge created");

        Ok(())
    }

    async fn find_by_key(&self, key: &str) -> CaptchaResult<Option<CaptchaChallenge>> {
        let row = sqlx::query_as::<_, ChallengeRow>(
            r#"
            SELECT
                id,
                challenge_key,
                question,
                answer,
                challenge_kind,
                phone,
                client_ip,
                expires_at,
                verified_at,
                invalidated_at,
                failed_attempts,
                created_at,
                version
            FROM captcha_challenges
            WHERE challenge_key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ChallengeRow::into_challenge).transpose()
    }

    async fn update(&self, challenge: &CaptchaChallenge) -> CaptchaResult<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE captcha_challenges
            SET
                verified_at = $3,
                invalidated_at = $4,
                failed_attempts = $5,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(challenge.id)
        .bind(challenge.version)
        .bind(challenge.verified_at)
        .bind(challenge.invalidated_at)
        .bind(challenge.failed_attempts)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(CaptchaError::ConcurrentUpdate);
        }

        Ok(())
    }

    async fn invalidate_outstanding(&self, phone: &str) -> CaptchaResult<u64> {
        let invalidated = sqlx::query(
            r#"
            UPDATE captcha_challenges
            SET invalidated_at = $2, version = version + 1
            WHERE phone = $1 AND verified_at IS NULL AND invalidated_at IS NULL
            "#,
        )
        .bind(phone)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(invalidated)
    }
}

// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct ChallengeRow {
    id: i64,
    challenge_key: String,
    question: String,
    answer: String,
    challenge_kind: String,
    phone: Option<String>,
    client_ip: Option<String>,
    expires_at: chrono::DateTime<chrono::Utc>,
    verified_at: Option<chrono::DateTime<chrono::Utc>>,
    invalidated_at: Option<chrono::DateTime<chrono::Utc>>,
    failed_attempts: i32,
    created_at: chrono::DateTime<chrono::Utc>,
    version: i64,
}

impl ChallengeRow {
    fn into_challenge(self) -> CaptchaResult<CaptchaChallenge> {
        let kind = ChallengeKind::parse(&self.challenge_kind).ok_or_else(|| {
            CaptchaError::Internal(format!("Unknown challenge kind: {}", self.challenge_kind))
        })?;

        Ok(CaptchaChallenge {
            id: self.id,
            key: self.challenge_key,
            question: self.question,
            answer: self.answer,
            kind,
            phone: self.phone,
            client_ip: self.client_ip,
            expires_at: self.expires_at,
            verified_at: self.verified_at,
            invalidated_at: self.invalidated_at,
            failed_attempts: self.failed_attempts,
            created_at: self.created_at,
            version: self.version,
        })
    }
}

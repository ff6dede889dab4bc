//! Domain Entities
//!
//! Core business entities for the CAPTCHA domain.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_objects::ChallengeKind;

/// Wrong answers allowed before a challenge is permanently invalidated
pub const MAX_FAILED_ATTEMPTS: i32 = 3;

/// CaptchaChallenge entity - an arithmetic challenge issued to a client
///
/// Consumed exactly once: a successful verification sets `verified_at`,
/// every other terminal outcome (expiry, failure threshold, superseded by
/// a newer challenge for the same phone) sets `invalidated_at`. Only a
/// challenge with `verified_at` set and `invalidated_at` unset counts as
/// solved.
#[derive(Debug, Clone)]
pub struct CaptchaChallenge {
    pub id: i64,
    /// Opaque lookup key (128-bit random, hex-encoded)
    pub key: String,
    /// Human-readable question, e.g. "3 + 5"
    pub question: String,
    /// Expected answer as stored text
    pub answer: String,
    pub kind: ChallengeKind,
    /// Phone number the challenge is bound to, if supplied at creation
    pub phone: Option<String>,
    pub client_ip: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
    pub invalidated_at: Option<DateTime<Utc>>,
    pub failed_attempts: i32,
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency counter
    pub version: i64,
}

impl CaptchaChallenge {
    /// Create a new challenge (id is assigned on insert)
    pub fn new(
        key: String,
        question: String,
        answer: String,
        phone: Option<String>,
        client_ip: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            key,
            question,
            answer,
            kind: ChallengeKind::Math,
            phone,
            client_ip,
            expires_at: now + ttl,
            verified_at: None,
            invalidated_at: None,
            failed_attempts: 0,
            created_at: now,
            version: 0,
        }
    }

    /// Check if the challenge TTL has elapsed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if the challenge has been consumed (any terminal outcome)
    pub fn is_consumed(&self) -> bool {
        self.verified_at.is_some() || self.invalidated_at.is_some()
    }

    /// Check if the challenge was solved successfully
    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some() && self.invalidated_at.is_none()
    }

    /// Record a wrong answer; the third one invalidates permanently
    pub fn record_failure(&mut self) {
        self.failed_attempts += 1;
        if self.failed_attempts >= MAX_FAILED_ATTEMPTS {
            self.invalidated_at = Some(Utc::now());
        }
    }

    /// Mark the challenge as solved
    pub fn mark_verified(&mut self) {
        self.verified_at = Some(Utc::now());
    }

    /// Consume the challenge without solving it
    pub fn invalidate(&mut self) {
        self.invalidated_at = Some(Utc::now());
    }
}

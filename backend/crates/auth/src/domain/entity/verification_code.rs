//! Verification Code Entity

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::CodeType;

/// Verification code entity
///
/// Single-use: consumed on a successful match, after the third mismatch,
/// or when superseded by a newer code for the same (phone, type).
#[derive(Debug, Clone)]
pub struct VerificationCode {
    pub id: i64,
    pub phone: String,
    pub user_id: Option<i64>,
    /// 6 digits, each drawn independently and uniformly
    pub code: String,
    pub code_type: CodeType,
    pub expires_at: DateTime<Utc>,
    /// Consumed flag; set on success, exhaustion, or supersession
    pub verified_at: Option<DateTime<Utc>>,
    pub attempt_count: i32,
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency counter
    pub version: i64,
}

impl VerificationCode {
    /// Digits in a code
    pub const CODE_LENGTH: usize = 6;
    /// Mismatches allowed before the code is force-consumed
    pub const MAX_ATTEMPTS: i32 = 3;

    /// Create a new verification code (id is assigned on insert)
    pub fn new(
        phone: String,
        user_id: Option<i64>,
        code: String,
        code_type: CodeType,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            phone,
            user_id,
            code,
            code_type,
            expires_at: now + ttl,
            verified_at: None,
            attempt_count: 0,
            created_at: now,
            version: 0,
        }
    }

    /// Check if the code TTL has elapsed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if the code has been consumed
    pub fn is_consumed(&self) -> bool {
        self.verified_at.is_some()
    }

    /// Record a value mismatch; the third one force-consumes the code
    pub fn record_mismatch(&mut self) {
        self.attempt_count += 1;
        if self.attempt_count >= Self::MAX_ATTEMPTS {
            self.verified_at = Some(Utc::now());
        }
    }

    /// Consume the code after a successful match
    pub fn consume(&mut self) {
        self.verified_at = Some(Utc::now());
    }
}

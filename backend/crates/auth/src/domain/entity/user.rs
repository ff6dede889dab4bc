//! User Entity
//!
//! Account record with credential and lockout state.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{LoginMethod, UserStatus};

/// User entity
///
/// Lockout state machine: `failed_login_attempts` counts consecutive
/// failures; the fifth one sets status LOCKED with a 30 minute expiry.
/// A login attempt after the expiry clears the lock before the password
/// is checked. Any successful login resets the counter.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub phone: Option<String>,
    /// Argon2id hash in PHC string format
    pub password_hash: String,
    pub organization_id: Option<i64>,
    /// Free-form classification from the credential store (e.g. DRIVER, MANAGER)
    pub user_type: String,
    pub status: UserStatus,
    pub failed_login_attempts: i32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,
    pub last_login_method: Option<LoginMethod>,
    /// Soft-delete timestamp; a deleted account can never log in
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency counter
    pub version: i64,
}

impl User {
    /// Consecutive failures before lockout
    pub const MAX_FAILED_LOGIN_ATTEMPTS: i32 = 5;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 30;

    /// Check if the account is soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the account is currently locked
    pub fn is_locked(&self) -> bool {
        if self.status != UserStatus::Locked {
            return false;
        }
        match self.locked_until {
            Some(until) => Utc::now() < until,
            // LOCKED without an expiry is an administrative lock
            None => true,
        }
    }

    /// Clear an elapsed lockout; returns true if state changed
    pub fn clear_expired_lock(&mut self) -> bool {
        if self.status == UserStatus::Locked
            && self.locked_until.is_some_and(|until| Utc::now() >= until)
        {
            self.status = UserStatus::Active;
            self.failed_login_attempts = 0;
            self.locked_until = None;
            self.updated_at = Utc::now();
            return true;
        }
        false
    }

    /// Record a failed login attempt; the fifth one locks the account
    pub fn record_failed_login(&mut self) {
        let now = Utc::now();
        self.failed_login_attempts += 1;
        self.updated_at = now;

        if self.failed_login_attempts >= Self::MAX_FAILED_LOGIN_ATTEMPTS {
            self.status = UserStatus::Locked;
            self.locked_until = Some(now + chrono::Duration::minutes(Self::LOCKOUT_MINUTES));
        }
    }

    /// Record a successful login and reset failure tracking
    pub fn record_login(&mut self, ip: Option<String>, method: LoginMethod) {
        let now = Utc::now();
        self.failed_login_attempts = 0;
        self.locked_until = None;
        self.status = UserStatus::Active;
        self.last_login_at = Some(now);
        self.last_login_ip = ip;
        self.last_login_method = Some(method);
        self.updated_at = now;
    }
}

/// Claims projection returned by the claims lookup
#[derive(Debug, Clone)]
pub struct UserClaims {
    pub id: i64,
    pub username: String,
    pub phone: Option<String>,
    pub organization_id: Option<i64>,
    pub user_type: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    /// Additional stored claims as (type, value) pairs
    pub extra: Vec<(String, String)>,
}

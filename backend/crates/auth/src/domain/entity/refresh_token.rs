//! Refresh Token Entity

use chrono::{DateTime, Duration, Utc};

/// Revocation reason recorded when a token is rotated
pub const REVOKE_REASON_ROTATED: &str = "Refresh token rotated";
/// Revocation reason recorded on logout without an explicit reason
pub const REVOKE_REASON_LOGOUT: &str = "User logout";

/// Refresh token entity
///
/// The token value is an opaque 64-byte random string, never a JWT.
/// Single-use: refreshing revokes the old row with reason
/// "Refresh token rotated" and inserts a new one atomically.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub organization_id: Option<i64>,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub revoked_reason: Option<String>,
    /// Client binding recorded at issuance
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Optimistic concurrency counter
    pub version: i64,
}

impl RefreshToken {
    /// Random bytes of entropy in a token value (base64-encoded for storage)
    pub const TOKEN_BYTES: usize = 64;

    /// Create a new refresh token (id is assigned on insert)
    pub fn new(
        user_id: i64,
        organization_id: Option<i64>,
        token: String,
        ttl: Duration,
        client_ip: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            organization_id,
            token,
            expires_at: now + ttl,
            revoked_at: None,
            revoked_reason: None,
            client_ip,
            user_agent,
            created_at: now,
            version: 0,
        }
    }

    /// Check if the token TTL has elapsed
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Check if the token has been revoked
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Check if the token can still be exchanged
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    /// Revoke the token with a reason
    pub fn revoke(&mut self, reason: &str) {
        self.revoked_at = Some(Utc::now());
        self.revoked_reason = Some(reason.to_string());
    }
}

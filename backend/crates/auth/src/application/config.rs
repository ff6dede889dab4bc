//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at process
//! start and treated as read-only for the process lifetime.

use std::time::Duration;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA-256 signing secret for access tokens
    pub jwt_secret: Vec<u8>,
    /// Expected `iss` claim
    pub jwt_issuer: String,
    /// Expected `aud` claim
    pub jwt_audience: String,
    /// Access token TTL
    pub access_token_ttl: Duration,
    /// Refresh token TTL
    pub refresh_token_ttl: Duration,
    /// SMS verification code TTL
    pub verification_code_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            jwt_issuer: "AuthService".to_string(),
            jwt_audience: "LogisticsSafetyPlatform".to_string(),
            access_token_ttl: Duration::from_secs(60 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            verification_code_ttl: Duration::from_secs(300),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Access token TTL in seconds
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.as_secs() as i64
    }

    /// Refresh token TTL as a chrono duration
    pub fn refresh_token_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.refresh_token_ttl.as_secs() as i64)
    }

    /// Verification code TTL in seconds
    pub fn verification_code_ttl_secs(&self) -> i64 {
        self.verification_code_ttl.as_secs() as i64
    }

    /// Verification code TTL as a chrono duration
    pub fn verification_code_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.verification_code_ttl_secs())
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

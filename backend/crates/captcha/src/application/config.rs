//! Application Configuration
//!
//! Configuration for the CAPTCHA application layer.

use std::time::Duration;

/// CAPTCHA application configuration
#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    /// Challenge TTL
    pub challenge_ttl: Duration,
    /// Challenge key length in random bytes (hex-encoded to twice as many chars)
    pub key_len_bytes: usize,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            challenge_ttl: Duration::from_secs(300),
            key_len_bytes: 16,
        }
    }
}

impl CaptchaConfig {
    pub fn challenge_ttl_secs(&self) -> i64 {
        self.challenge_ttl.as_secs() as i64
    }
}

//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Request for POST /captcha (body is optional)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaptchaRequest {
    /// Phone to bind the challenge to (required for phone+password login)
    #[serde(default)]
    pub phone: Option<String>,
}

/// Response for POST /captcha
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaChallengeResponse {
    pub success: bool,
    pub challenge_key: String,
    pub challenge: String,
    pub expires_in: i64,
}

/// Request for POST /verify-captcha
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCaptchaRequest {
    pub challenge_key: String,
    pub answer: String,
}

/// Response for POST /verify-captcha
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCaptchaResponse {
    pub success: bool,
    pub message: String,
}

//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::login::UserSummary;
use crate::domain::entity::user::UserClaims;

// ============================================================================
// Login
// ============================================================================

/// Request for POST /login (legacy username form)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request for POST /login/password
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonePasswordLoginRequest {
    pub phone: String,
    pub password: String,
    pub captcha_key: String,
}

/// Request for POST /login/code
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsCodeLoginRequest {
    pub phone: String,
    pub code: String,
}

/// User summary in login responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    pub user_type: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
}

impl From<UserSummary> for UserResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id,
            username: summary.username,
            phone: summary.phone,
            organization_id: summary.organization_id,
            user_type: summary.user_type,
            roles: summary.roles,
            permissions: summary.permissions,
        }
    }
}

/// Response for the login endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

// ============================================================================
// Verification Codes
// ============================================================================

/// Request for POST /request-code
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeRequest {
    pub phone: String,
}

/// Response for POST /request-code
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestCodeResponse {
    pub success: bool,
    pub message: String,
    pub expires_in: i64,
}

// ============================================================================
// Refresh / Logout
// ============================================================================

/// Request for POST /refresh and POST /logout
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Response for POST /refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
}

/// Response for POST /logout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Claims
// ============================================================================

/// Response for GET /me
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimsResponse {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<i64>,
    pub user_type: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub claims: Vec<ClaimEntry>,
}

/// Additional stored claim
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimEntry {
    pub claim_type: String,
    pub claim_value: String,
}

impl From<UserClaims> for ClaimsResponse {
    fn from(claims: UserClaims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            phone: claims.phone,
            organization_id: claims.organization_id,
            user_type: claims.user_type,
            roles: claims.roles,
            permissions: claims.permissions,
            claims: claims
                .extra
                .into_iter()
                .map(|(claim_type, claim_value)| ClaimEntry {
                    claim_type,
                    claim_value,
                })
                .collect(),
        }
    }
}

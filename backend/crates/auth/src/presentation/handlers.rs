//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Extension;

use platform::client::extract_client_context;

use crate::application::claims::UserClaimsUseCase;
use crate::application::config::AuthConfig;
use crate::application::login::LoginUseCase;
use crate::application::refresh::RefreshTokenUseCase;
use crate::application::revoke::RevokeTokenUseCase;
use crate::application::token::TokenIssuer;
use crate::application::verification_code::GenerateCodeUseCase;
use crate::domain::notifier::SmsNotifier;
use crate::domain::repository::{
    CaptchaGate, RefreshTokenRepository, UserRepository, VerificationCodeRepository,
};
use crate::domain::value_object::CodeType;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ClaimsResponse, LoginRequest, LoginResponse, LogoutResponse, PhonePasswordLoginRequest,
    RefreshTokenRequest, RefreshTokenResponse, RequestCodeRequest, RequestCodeResponse,
    SmsCodeLoginRequest,
};
use crate::presentation::middleware::AuthUserId;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, N>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub notifier: Arc<N>,
    pub issuer: Arc<TokenIssuer>,
    pub config: Arc<AuthConfig>,
}

impl<R, N> AuthAppState<R, N>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    fn login_use_case(&self) -> LoginUseCase<R, R, R, R> {
        LoginUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.issuer.clone(),
            self.config.clone(),
        )
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /login (legacy username form)
pub async fn login<R, N>(
    State(state): State<AuthAppState<R, N>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    let client = extract_client_context(&headers, Some(addr.ip()));

    let output = state
        .login_use_case()
        .with_username(&req.username, &req.password, &client)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        user: output.user.into(),
    }))
}

/// POST /login/password
pub async fn login_by_phone_password<R, N>(
    State(state): State<AuthAppState<R, N>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<PhonePasswordLoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    let client = extract_client_context(&headers, Some(addr.ip()));

    let output = state
        .login_use_case()
        .with_phone_password(&req.phone, &req.password, &req.captcha_key, &client)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        user: output.user.into(),
    }))
}

/// POST /login/code
pub async fn login_by_sms_code<R, N>(
    State(state): State<AuthAppState<R, N>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SmsCodeLoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    let client = extract_client_context(&headers, Some(addr.ip()));

    let output = state
        .login_use_case()
        .with_sms_code(&req.phone, &req.code, &client)
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        access_token: output.access_token,
        refresh_token: output.refresh_token,
        user: output.user.into(),
    }))
}

// ============================================================================
// Verification Codes
// ============================================================================

/// POST /request-code
pub async fn request_code<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<RequestCodeRequest>,
) -> AuthResult<Json<RequestCodeResponse>>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    let use_case = GenerateCodeUseCase::new(
        state.repo.clone(),
        state.notifier.clone(),
        state.config.clone(),
    );

    // The code value stays server-side; only the TTL goes to the client
    let output = use_case.execute(&req.phone, CodeType::Login, None).await?;

    Ok(Json(RequestCodeResponse {
        success: true,
        message: "Verification code sent".to_string(),
        expires_in: output.expires_in_secs,
    }))
}

// ============================================================================
// Refresh / Logout
// ============================================================================

/// POST /refresh
pub async fn refresh_token<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<RefreshTokenRequest>,
) -> AuthResult<Json<RefreshTokenResponse>>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    let client = extract_client_context(&headers, Some(addr.ip()));

    let use_case = RefreshTokenUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.issuer.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(&req.refresh_token, user_id, &client).await?;

    Ok(Json(RefreshTokenResponse {
        success: true,
        access_token: output.access_token,
        refresh_token: output.refresh_token,
    }))
}

/// POST /logout
pub async fn logout<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Json(req): Json<RefreshTokenRequest>,
) -> AuthResult<Json<LogoutResponse>>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    let use_case = RevokeTokenUseCase::new(state.repo.clone());

    let revoked = use_case.execute(&req.refresh_token, None).await?;

    Ok(Json(LogoutResponse { success: revoked }))
}

// ============================================================================
// Claims
// ============================================================================

/// GET /me
pub async fn me<R, N>(
    State(state): State<AuthAppState<R, N>>,
    Extension(AuthUserId(user_id)): Extension<AuthUserId>,
) -> AuthResult<Json<ClaimsResponse>>
where
    R: UserRepository
        + RefreshTokenRepository
        + VerificationCodeRepository
        + CaptchaGate
        + Clone
        + Send
        + Sync
        + 'static,
    N: SmsNotifier + Clone + Send + Sync + 'static,
{
    let use_case = UserClaimsUseCase::new(state.repo.clone());

    let claims = use_case
        .execute(user_id)
        .await?
        .ok_or(AuthError::ClaimsNotFound)?;

    Ok(Json(claims.into()))
}

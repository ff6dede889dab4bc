//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use platform::client::extract_client_ip;

use crate::application::config::CaptchaConfig;
use crate::application::create_challenge::{CreateChallengeInput, CreateChallengeUseCase};
use crate::application::verify_challenge::VerifyChallengeUseCase;
use crate::domain::repository::ChallengeRepository;
use crate::error::CaptchaResult;
use crate::presentation::dto::{
    CaptchaChallengeResponse, CreateCaptchaRequest, VerifyCaptchaRequest, VerifyCaptchaResponse,
};

/// Shared state for CAPTCHA handlers
#[derive(Clone)]
pub struct CaptchaAppState<R>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CaptchaConfig>,
}

/// POST /captcha
pub async fn create_captcha<R>(
    State(state): State<CaptchaAppState<R>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    body: Option<Json<CreateCaptchaRequest>>,
) -> CaptchaResult<Json<CaptchaChallengeResponse>>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let use_case = CreateChallengeUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(CreateChallengeInput {
            phone: request.phone,
            client_ip: client_ip.map(|ip| ip.to_string()),
        })
        .await?;

    Ok(Json(CaptchaChallengeResponse {
        success: true,
        challenge_key: output.key,
        challenge: output.question,
        expires_in: output.expires_in_secs,
    }))
}

/// POST /verify-captcha
pub async fn verify_captcha<R>(
    State(state): State<CaptchaAppState<R>>,
    Json(request): Json<VerifyCaptchaRequest>,
) -> CaptchaResult<Json<VerifyCaptchaResponse>>
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyChallengeUseCase::new(state.repo.clone());

    use_case
        .execute(&request.challenge_key, &request.answer)
        .await?;

    Ok(Json(VerifyCaptchaResponse {
        success: true,
        message: "CAPTCHA verified".to_string(),
    }))
}

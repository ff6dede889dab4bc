//! CAPTCHA Router

use std::sync::Arc;

use axum::{Router, routing::post};

use crate::application::config::CaptchaConfig;
use crate::domain::repository::ChallengeRepository;
use crate::infra::postgres::PgCaptchaRepository;
use crate::presentation::handlers::{self, CaptchaAppState};

/// Create the CAPTCHA router with PostgreSQL repository
pub fn captcha_router(repo: PgCaptchaRepository, config: CaptchaConfig) -> Router {
    captcha_router_generic(repo, config)
}

/// Create a generic CAPTCHA router for any repository implementation
pub fn captcha_router_generic<R>(repo: R, config: CaptchaConfig) -> Router
where
    R: ChallengeRepository + Clone + Send + Sync + 'static,
{
    let state = CaptchaAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/captcha", post(handlers::create_captcha::<R>))
        .route("/verify-captcha", post(handlers::verify_captcha::<R>))
        .with_state(state)
}

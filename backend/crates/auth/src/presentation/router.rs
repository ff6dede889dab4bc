//! Auth Router

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::notifier::SmsNotifier;
use crate::domain::repository::{
    CaptchaGate, RefreshTokenRepository, UserRepository, VerificationCodeRepository,
};
use crate::infra::postgres::PgAuthRepository;
use crate::infra::sms::LogSmsNotifier;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_access_token};

/// Create the auth router with PostgreSQL repository and log-only SMS dispatch
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, LogSmsNotifier, config)
}

/// Create a generic auth router for any repository and notifier implementation
pub fn auth_router_generic<R, N>(repo: R, notifier: N, config: AuthConfig) -> Router
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
    let issuer = Arc::new(TokenIssuer::new(&config));

    let state = AuthAppState {
        repo: Arc::new(repo),
        notifier: Arc::new(notifier),
        issuer: issuer.clone(),
        config: Arc::new(config),
    };

    let public = Router::new()
        .route("/login", post(handlers::login::<R, N>))
        .route("/login/password", post(handlers::login_by_phone_password::<R, N>))
        .route("/login/code", post(handlers::login_by_sms_code::<R, N>))
        .route("/request-code", post(handlers::request_code::<R, N>));

    // /refresh, /logout and /me require a valid (possibly near-expiry) access token
    let protected = Router::new()
        .route("/refresh", post(handlers::refresh_token::<R, N>))
        .route("/logout", post(handlers::logout::<R, N>))
        .route("/me", get(handlers::me::<R, N>))
        .route_layer(from_fn_with_state(
            AuthMiddlewareState { issuer },
            require_access_token,
        ));

    public.merge(protected).with_state(state)
}

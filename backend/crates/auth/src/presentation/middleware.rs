//! Auth Middleware
//!
//! Bearer token validation for protected routes. Inserts the
//! authenticated user id into request extensions.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::token::TokenIssuer;
use crate::error::AuthError;

/// Authenticated user id stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthUserId(pub i64);

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub issuer: Arc<TokenIssuer>,
}

/// Middleware that requires a valid bearer access token
pub async fn require_access_token(
    State(state): State<AuthMiddlewareState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| AuthError::MissingAuthHeader.into_response())?;

    let claims = state
        .issuer
        .decode(token)
        .map_err(|e| e.into_response())?;

    let user_id = TokenIssuer::user_id(&claims).map_err(|e| e.into_response())?;

    req.extensions_mut().insert(AuthUserId(user_id));

    Ok(next.run(req).await)
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

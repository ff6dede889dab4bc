//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use captcha::{CaptchaConfig, PgCaptchaRepository, captcha_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,captcha=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired auth and CAPTCHA data
    // Errors here should not prevent server startup
    let auth_repo_for_cleanup = PgAuthRepository::new(pool.clone());
    match auth_repo_for_cleanup.cleanup_expired().await {
        Ok((tokens, codes)) => {
            tracing::info!(
                tokens_deleted = tokens,
                codes_deleted = codes,
                "Auth cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Auth cleanup failed, continuing anyway"
            );
        }
    }

    let captcha_repo_for_cleanup = PgCaptchaRepository::new(pool.clone());
    match captcha_repo_for_cleanup.cleanup_expired().await {
        Ok(challenges) => {
            tracing::info!(
                challenges_deleted = challenges,
                "CAPTCHA cleanup completed"
            );
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "CAPTCHA cleanup failed, continuing anyway"
            );
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load the signing secret from environment
        let secret_b64 = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");
        let jwt_secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;

        let password_pepper = match env::var("PASSWORD_PEPPER") {
            Ok(b64) => Some(Engine::decode(&general_purpose::STANDARD, &b64)?),
            Err(_) => None,
        };

        AuthConfig {
            jwt_secret,
            password_pepper,
            ..AuthConfig::default()
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router: login, token and CAPTCHA endpoints share one prefix
    let auth_api = auth_router(PgAuthRepository::new(pool.clone()), auth_config).merge(
        captcha_router(PgCaptchaRepository::new(pool.clone()), CaptchaConfig::default()),
    );

    let app = Router::new()
        .nest("/api/v1/auth", auth_api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

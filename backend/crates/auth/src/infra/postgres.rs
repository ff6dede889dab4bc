//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::refresh_token::RefreshToken;
use crate::domain::entity::user::User;
use crate::domain::entity::verification_code::VerificationCode;
use crate::domain::repository::{
    CaptchaGate, RefreshTokenRepository, UserRepository, VerificationCodeRepository,
    VerifiedChallenge,
};
use crate::domain::value_object::{CodeType, LoginMethod, UserStatus};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete expired refresh tokens and verification codes
    pub async fn cleanup_expired(&self) -> AuthResult<(u64, u64)> {
        let now = Utc::now();

        let tokens_deleted = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        let codes_deleted = sqlx::query("DELETE FROM verification_codes WHERE expires_at < $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(
            refresh_tokens = tokens_deleted,
            verification_codes = codes_deleted,
            "Cleaned up expired auth data"
        );

        Ok((tokens_deleted, codes_deleted))
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

const USER_COLUMNS: &str = r#"
    id,
    username,
    phone,
    password_hash,
    organization_id,
    user_type,
    status,
    failed_login_attempts,
    locked_until,
    last_login_at,
    last_login_ip,
    last_login_method,
    deleted_at,
    created_at,
    updated_at,
    version
"#;

impl UserRepository for PgAuthRepository {
    async fn find_by_id(&self, user_id: i64) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone = $1"
        ))
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn update(&self, user: &mut User) -> AuthResult<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE users
            SET
                status = $3,
                failed_login_attempts = $4,
                locked_until = $5,
                last_login_at = $6,
                last_login_ip = $7,
                last_login_method = $8,
                updated_at = $9,
                version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(user.id)
        .bind(user.version)
        .bind(user.status.as_str())
        .bind(user.failed_login_attempts)
        .bind(user.locked_until)
        .bind(user.last_login_at)
        .bind(&user.last_login_ip)
        .bind(user.last_login_method.map(|m| m.as_str()))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AuthError::ConcurrentUpdate);
        }

        user.version += 1;
        Ok(())
    }

    async fn get_roles(&self, user_id: i64) -> AuthResult<Vec<String>> {
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.code
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.code
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    async fn get_permissions(&self, user_id: i64) -> AuthResult<Vec<String>> {
        let permissions = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT p.code
            FROM permissions p
            JOIN role_permissions rp ON rp.permission_id = p.id
            JOIN user_roles ur ON ur.role_id = rp.role_id
            WHERE ur.user_id = $1
            ORDER BY p.code
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    async fn get_extra_claims(&self, user_id: i64) -> AuthResult<Vec<(String, String)>> {
        let claims = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT claim_type, claim_value
            FROM user_claims
            WHERE user_id = $1
            ORDER BY claim_type
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(claims)
    }
}

// ============================================================================
// Refresh Token Repository Implementation
// ============================================================================

const REFRESH_TOKEN_COLUMNS: &str = r#"
    id,
    user_id,
    organization_id,
    token,
    expires_at,
    revoked_at,
    revoked_reason,
    client_ip,
    user_agent,
    created_at,
    version
"#;

impl RefreshTokenRepository for PgAuthRepository {
    async fn create(&self, token: &RefreshToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (
                user_id,
                organization_id,
                token,
                expires_at,
                client_ip,
                user_agent,
                created_at,
                version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(token.user_id)
        .bind(token.organization_id)
        .bind(&token.token)
        .bind(token.expires_at)
        .bind(&token.client_ip)
        .bind(&token.user_agent)
        .bind(token.created_at)
        .bind(token.version)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token_and_user(
        &self,
        token: &str,
        user_id: i64,
    ) -> AuthResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            "SELECT {REFRESH_TOKEN_COLUMNS} FROM refresh_tokens WHERE token = $1 AND user_id = $2"
        ))
        .bind(token)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_refresh_token))
    }

    async fn find_by_token(&self, token: &str) -> AuthResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(&format!(
            "SELECT {REFRESH_TOKEN_COLUMNS} FROM refresh_tokens WHERE token = $1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_refresh_token))
    }

    async fn update(&self, token: &mut RefreshToken) -> AuthResult<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $3, revoked_reason = $4, version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(token.id)
        .bind(token.version)
        .bind(token.revoked_at)
        .bind(&token.revoked_reason)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AuthError::ConcurrentUpdate);
        }

        token.version += 1;
        Ok(())
    }

    async fn rotate(&self, old: &mut RefreshToken, new: &RefreshToken) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        let rows_affected = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = $3, revoked_reason = $4, version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(old.id)
        .bind(old.version)
        .bind(old.revoked_at)
        .bind(&old.revoked_reason)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            // Someone else rotated or revoked this token first
            tx.rollback().await?;
            return Err(AuthError::ConcurrentUpdate);
        }

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (
                user_id,
                organization_id,
                token,
                expires_at,
                client_ip,
                user_agent,
                created_at,
                version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(new.user_id)
        .bind(new.organization_id)
        .bind(&new.token)
        .bind(new.expires_at)
        .bind(&new.client_ip)
        .bind(&new.user_agent)
        .bind(new.created_at)
        .bind(new.version)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        old.version += 1;
        Ok(())
    }
}

// ============================================================================
// Verification Code Repository Implementation
// ============================================================================

impl VerificationCodeRepository for PgAuthRepository {
    async fn create(&self, code: &VerificationCode) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO verification_codes (
                phone,
                user_id,
                code,
                code_type,
                expires_at,
                attempt_count,
                created_at,
                version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&code.phone)
        .bind(code.user_id)
        .bind(&code.code)
        .bind(code.code_type.as_str())
        .bind(code.expires_at)
        .bind(code.attempt_count)
        .bind(code.created_at)
        .bind(code.version)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn invalidate_outstanding(&self, phone: &str, code_type: CodeType) -> AuthResult<u64> {
        let invalidated = sqlx::query(
            r#"
            UPDATE verification_codes
            SET verified_at = $3, version = version + 1
            WHERE phone = $1 AND code_type = $2 AND verified_at IS NULL
            "#,
        )
        .bind(phone)
        .bind(code_type.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(invalidated)
    }

    async fn find_newest_valid(
        &self,
        phone: &str,
        code_type: CodeType,
    ) -> AuthResult<Option<VerificationCode>> {
        let row = sqlx::query_as::<_, VerificationCodeRow>(
            r#"
            SELECT
                id,
                phone,
                user_id,
                code,
                code_type,
                expires_at,
                verified_at,
                attempt_count,
                created_at,
                version
            FROM verification_codes
            WHERE phone = $1
              AND code_type = $2
              AND verified_at IS NULL
              AND expires_at > $3
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(phone)
        .bind(code_type.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        row.map(VerificationCodeRow::into_verification_code)
            .transpose()
    }

    async fn update(&self, code: &mut VerificationCode) -> AuthResult<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE verification_codes
            SET verified_at = $3, attempt_count = $4, version = version + 1
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(code.id)
        .bind(code.version)
        .bind(code.verified_at)
        .bind(code.attempt_count)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AuthError::ConcurrentUpdate);
        }

        code.version += 1;
        Ok(())
    }
}

// ============================================================================
// CAPTCHA Gate Implementation (read-only view over captcha_challenges)
// ============================================================================

impl CaptchaGate for PgAuthRepository {
    async fn find_verified_challenge(&self, key: &str) -> AuthResult<Option<VerifiedChallenge>> {
        let row = sqlx::query_as::<_, (String, Option<String>, DateTime<Utc>)>(
            r#"
            SELECT challenge_key, phone, verified_at
            FROM captcha_challenges
            WHERE challenge_key = $1
              AND verified_at IS NOT NULL
              AND invalidated_at IS NULL
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(key, phone, verified_at)| VerifiedChallenge {
            key,
            phone,
            verified_at,
        }))
    }
}

// ============================================================================
// Internal row types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    phone: Option<String>,
    password_hash: String,
    organization_id: Option<i64>,
    user_type: String,
    status: String,
    failed_login_attempts: i32,
    locked_until: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    last_login_ip: Option<String>,
    last_login_method: Option<String>,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let status = UserStatus::parse(&self.status)
            .ok_or_else(|| AuthError::Internal(format!("Unknown user status: {}", self.status)))?;

        let last_login_method = match self.last_login_method {
            Some(m) => Some(LoginMethod::parse(&m).ok_or_else(|| {
                AuthError::Internal(format!("Unknown login method: {}", m))
            })?),
            None => None,
        };

        Ok(User {
            id: self.id,
            username: self.username,
            phone: self.phone,
            password_hash: self.password_hash,
            organization_id: self.organization_id,
            user_type: self.user_type,
            status,
            failed_login_attempts: self.failed_login_attempts,
            locked_until: self.locked_until,
            last_login_at: self.last_login_at,
            last_login_ip: self.last_login_ip,
            last_login_method,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            version: self.version,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    id: i64,
    user_id: i64,
    organization_id: Option<i64>,
    token: String,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
    revoked_reason: Option<String>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    version: i64,
}

impl RefreshTokenRow {
    fn into_refresh_token(self) -> RefreshToken {
        RefreshToken {
            id: self.id,
            user_id: self.user_id,
            organization_id: self.organization_id,
            token: self.token,
            expires_at: self.expires_at,
            revoked_at: self.revoked_at,
            revoked_reason: self.revoked_reason,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            version: self.version,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VerificationCodeRow {
    id: i64,
    phone: String,
    user_id: Option<i64>,
    code: String,
    code_type: String,
    expires_at: DateTime<Utc>,
    verified_at: Option<DateTime<Utc>>,
    attempt_count: i32,
    created_at: DateTime<Utc>,
    version: i64,
}

impl VerificationCodeRow {
    fn into_verification_code(self) -> AuthResult<VerificationCode> {
        let code_type = CodeType::parse(&self.code_type).ok_or_else(|| {
            AuthError::Internal(format!("Unknown code type: {}", self.code_type))
        })?;

        Ok(VerificationCode {
            id: self.id,
            phone: self.phone,
            user_id: self.user_id,
            code: self.code,
            code_type,
            expires_at: self.expires_at,
            verified_at: self.verified_at,
            attempt_count: self.attempt_count,
            created_at: self.created_at,
            version: self.version,
        })
    }
}

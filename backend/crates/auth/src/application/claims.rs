//! User Claims Use Case
//!
//! Claims projection behind `GET /me`.

use std::sync::Arc;

use crate::domain::entity::user::UserClaims;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// User claims use case
pub struct UserClaimsUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserClaimsUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Resolve the claims for a user id; `None` for missing or
    /// soft-deleted accounts
    pub async fn execute(&self, user_id: i64) -> AuthResult<Option<UserClaims>> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(None);
        };
        if user.is_deleted() {
            return Ok(None);
        }

        let roles = self.user_repo.get_roles(user.id).await?;
        let permissions = self.user_repo.get_permissions(user.id).await?;
        let extra = self.user_repo.get_extra_claims(user.id).await?;

        Ok(Some(UserClaims {
            id: user.id,
            username: user.username,
            phone: user.phone,
            organization_id: user.organization_id,
            user_type: user.user_type,
            roles,
            permissions,
            extra,
        }))
    }
}

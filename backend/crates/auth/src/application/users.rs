//! User Account Use Case
//!
//! Listing, lookup, profile and self-service update/delete of accounts.

use std::sync::Arc;

use crate::domain::entity::{identity::AuthenticatedIdentity, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Fields a user may change on their own account
#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
}

/// User account use case
pub struct UserAccountUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UserAccountUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_all().await
    }

    /// Look up by textual id; a malformed id is simply not found
    pub async fn get(&self, raw_id: &str) -> AuthResult<User> {
        let user_id = UserId::parse_str(raw_id).map_err(|_| AuthError::UserNotFound)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn profile(&self, caller: &AuthenticatedIdentity) -> AuthResult<User> {
        self.user_repo
            .find_by_id(&caller.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedIdentity,
        raw_id: &str,
        input: UpdateUserInput,
    ) -> AuthResult<User> {
        let user_id = owned_target(caller, raw_id, "You can only update your own profile")?;

        let user_name = input
            .user_name
            .map(UserName::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = input.email.map(Email::new).transpose()?;

        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.update_profile(user_name, email);

        if !self.user_repo.update(&user).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.user_id, "User profile updated");
        Ok(user)
    }

    pub async fn delete(&self, caller: &AuthenticatedIdentity, raw_id: &str) -> AuthResult<()> {
        let user_id = owned_target(caller, raw_id, "You can only delete your own profile")?;

        if !self.user_repo.delete(&user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

/// The target id, provided it is the caller's own
///
/// Checked before any lookup, so a malformed or foreign id is 403, not 404.
fn owned_target(
    caller: &AuthenticatedIdentity,
    raw_id: &str,
    message: &'static str,
) -> AuthResult<UserId> {
    match UserId::parse_str(raw_id) {
        Ok(user_id) if caller.is(&user_id) => Ok(user_id),
        _ => Err(AuthError::Forbidden(message)),
    }
}

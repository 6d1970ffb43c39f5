//! Logout Use Case
//!
//! Revokes one refresh token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::present;
use crate::application::tokens::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LogoutUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Remove `refresh_token` from its owner's collection
    ///
    /// Succeeds even if the token was already revoked, as long as it still
    /// verifies and its owner exists.
    pub async fn execute(&self, refresh_token: Option<String>) -> AuthResult<()> {
        let refresh_token = present(refresh_token)
            .ok_or_else(|| AuthError::Validation("Refresh token is required".to_string()))?;

        let user_id = TokenIssuer::new(self.config.clone()).verify_refresh(&refresh_token)?;

        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        user.revoke_refresh_token(&refresh_token);

        if !self.user_repo.update(&user).await? {
            return Err(AuthError::InvalidToken);
        }

        tracing::info!(user_id = %user.user_id, "User logged out");
        Ok(())
    }
}

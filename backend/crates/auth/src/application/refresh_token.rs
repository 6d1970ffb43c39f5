//! Refresh Token Use Case
//!
//! Single-use rotation: the presented refresh token is swapped for a new
//! pair. Presenting a token that verifies but is no longer in the user's
//! collection is reported as a security event.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::present;
use crate::application::tokens::{TokenIssuer, TokenPair};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Refresh token use case
pub struct RefreshTokenUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RefreshTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, refresh_token: Option<String>) -> AuthResult<TokenPair> {
        let refresh_token = present(refresh_token)
            .ok_or_else(|| AuthError::Validation("Refresh token is required".to_string()))?;

        let issuer = TokenIssuer::new(self.config.clone());
        let user_id = issuer.verify_refresh(&refresh_token)?;

        let mut user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if !user.has_refresh_token(&refresh_token) {
            tracing::warn!(
                target: "auth::security",
                user_id = %user_id,
                "Refresh token reuse detected"
            );
            return Err(AuthError::RefreshTokenReused { user_id });
        }

        let tokens = issuer.issue_pair(&user.user_id)?;
        user.rotate_refresh_token(&refresh_token, tokens.refresh_token.clone());

        if !self.user_repo.update(&user).await? {
            return Err(AuthError::InvalidRefreshToken);
        }

        tracing::info!(user_id = %user.user_id, "Refresh token rotated");

        Ok(tokens)
    }
}

//! Login Use Case
//!
//! Verifies credentials and issues a new token pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::register::present;
use crate::application::tokens::{TokenIssuer, TokenPair};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
pub struct LoginOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let (Some(email), Some(password)) = (present(input.email), present(input.password)) else {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        // A malformed email cannot belong to anyone
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::new(password).map_err(|_| AuthError::InvalidCredentials)?;
        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = TokenIssuer::new(self.config.clone()).issue_pair(&user.user_id)?;
        user.add_refresh_token(tokens.refresh_token.clone());

        if !self.user_repo.update(&user).await? {
            // Deleted between lookup and write
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { user, tokens })
    }
}

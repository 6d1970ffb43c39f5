//! Register Use Case
//!
//! Creates a new user account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::{TokenIssuer, TokenPair};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input; `None` or empty means the field was not supplied
pub struct RegisterInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register output
pub struct RegisterOutput {
    pub user: User,
    pub tokens: TokenPair,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let (Some(user_name), Some(email), Some(password)) = (
            present(input.user_name),
            present(input.email),
            present(input.password),
        ) else {
            return Err(AuthError::Validation("All fields are required".to_string()));
        };

        let user_name = UserName::new(user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(email)?;

        if self
            .user_repo
            .exists_by_email_or_user_name(&email, &user_name)
            .await?
        {
            return Err(AuthError::UserAlreadyExists);
        }

        let raw_password = RawPassword::new(password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let mut user = User::new(user_name, email, password_hash);

        let tokens = TokenIssuer::new(self.config.clone()).issue_pair(&user.user_id)?;
        user.add_refresh_token(tokens.refresh_token.clone());

        // Unique constraints still catch a concurrent registration
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(RegisterOutput { user, tokens })
    }
}

/// Treat absent and empty strings alike
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

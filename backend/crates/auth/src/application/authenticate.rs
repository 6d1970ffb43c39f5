//! Authenticate Use Case
//!
//! Resolves a bearer access token to the caller. Read-only.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::bearer::extract_bearer;

use crate::application::config::AuthConfig;
use crate::application::tokens::TokenIssuer;
use crate::domain::entity::identity::AuthenticatedIdentity;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Authenticate from request headers
    pub async fn execute(&self, headers: &HeaderMap) -> AuthResult<AuthenticatedIdentity> {
        let token = extract_bearer(headers).map_err(|_| AuthError::MissingToken)?;
        self.execute_token(token).await
    }

    /// Authenticate a bare access token
    pub async fn execute_token(&self, token: &str) -> AuthResult<AuthenticatedIdentity> {
        let user_id = TokenIssuer::new(self.config.clone()).verify_access(token)?;

        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        Ok(user.identity())
    }
}

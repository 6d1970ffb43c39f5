//! Token Issuance
//!
//! Mints access/refresh pairs for a user and resolves tokens back to ids.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// A freshly minted access/refresh pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies both token classes
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    config: Arc<AuthConfig>,
}

impl TokenIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn issue_pair(&self, user_id: &UserId) -> AuthResult<TokenPair> {
        let subject = user_id.into_uuid();

        Ok(TokenPair {
            access_token: self
                .config
                .access_keys
                .sign(subject, self.config.access_token_ttl)?,
            refresh_token: self
                .config
                .refresh_keys
                .sign(subject, self.config.refresh_token_ttl)?,
        })
    }

    /// Resolve an access token to its subject; any failure is `InvalidToken`
    pub fn verify_access(&self, token: &str) -> AuthResult<UserId> {
        let claims = self.config.access_keys.verify(token)?;
        Ok(UserId::from_uuid(claims.sub))
    }

    /// Resolve a refresh token to its subject; any failure is `InvalidToken`
    pub fn verify_refresh(&self, token: &str) -> AuthResult<UserId> {
        self.config
            .refresh_keys
            .verify(token)
            .map(|claims| UserId::from_uuid(claims.sub))
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_resolves_to_user() {
        let issuer = TokenIssuer::new(Arc::new(AuthConfig::with_random_secrets()));
        let user_id = UserId::new();

        let pair = issuer.issue_pair(&user_id).unwrap();

        assert_eq!(issuer.verify_access(&pair.access_token).unwrap(), user_id);
        assert_eq!(issuer.verify_refresh(&pair.refresh_token).unwrap(), user_id);
    }

    #[test]
    fn test_classes_do_not_cross_verify() {
        let issuer = TokenIssuer::new(Arc::new(AuthConfig::with_random_secrets()));
        let pair = issuer.issue_pair(&UserId::new()).unwrap();

        assert!(matches!(
            issuer.verify_access(&pair.refresh_token),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            issuer.verify_refresh(&pair.access_token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_each_pair_is_unique() {
        let issuer = TokenIssuer::new(Arc::new(AuthConfig::with_random_secrets()));
        let user_id = UserId::new();

        let a = issuer.issue_pair(&user_id).unwrap();
        let b = issuer.issue_pair(&user_id).unwrap();
        assert_ne!(a.refresh_token, b.refresh_token);
    }
}

//! Signed Token Infrastructure
//!
//! HS256 JSON Web Tokens bound to a subject id with an embedded expiry.
//! Each token class (access / refresh) gets its own [`TokenKeys`], so a
//! leaked key for one class cannot mint or verify the other.

use std::fmt;
use std::time::Duration;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind, get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// `exp` is in the past
    #[error("Token has expired")]
    Expired,

    /// Bad signature, malformed structure or wrong algorithm
    #[error("Token is invalid")]
    Invalid,

    /// Signing failed
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Registered claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Issued at (seconds since epoch)
    pub iat: u64,
    /// Expiry (seconds since epoch)
    pub exp: u64,
    /// Unique token id; two tokens for one subject never collide
    pub jti: Uuid,
}

/// Signing and verification keys derived from one shared secret
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a new token for `subject`, valid for `ttl` from now
    pub fn sign(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        let iat = get_current_timestamp();
        let claims = Claims {
            sub: subject,
            iat,
            exp: iat.saturating_add(ttl.as_secs()),
            jti: Uuid::new_v4(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(15 * 60);

    #[test]
    fn test_sign_and_verify() {
        let keys = TokenKeys::from_secret(b"access-secret");
        let subject = Uuid::new_v4();

        let token = keys.sign(subject, TTL).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, subject);
        assert_eq!(claims.exp - claims.iat, TTL.as_secs());
    }

    #[test]
    fn test_tokens_for_same_subject_differ() {
        let keys = TokenKeys::from_secret(b"access-secret");
        let subject = Uuid::new_v4();

        let a = keys.sign(subject, TTL).unwrap();
        let b = keys.sign(subject, TTL).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let access = TokenKeys::from_secret(b"access-secret");
        let refresh = TokenKeys::from_secret(b"refresh-secret");

        let token = access.sign(Uuid::new_v4(), TTL).unwrap();
        assert!(matches!(refresh.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expired_token() {
        let keys = TokenKeys::from_secret(b"access-secret");
        let now = get_current_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 120,
            exp: now - 60,
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        assert!(matches!(keys.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let keys = TokenKeys::from_secret(b"access-secret");
        assert!(matches!(keys.verify("not.a.jwt"), Err(TokenError::Invalid)));
        assert!(matches!(keys.verify(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_debug_redaction() {
        let keys = TokenKeys::from_secret(b"access-secret");
        assert!(!format!("{:?}", keys).contains("access-secret"));
    }
}

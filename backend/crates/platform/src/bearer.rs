//! Bearer Token Extraction
//!
//! Parses `Authorization: Bearer <token>` request headers.

use axum::http::{HeaderMap, header};
use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

/// Header parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    /// No Authorization header, or no token after the prefix
    #[error("No token provided")]
    Missing,

    /// Header present but not a bearer credential
    #[error("Authorization header is not a bearer credential")]
    Malformed,
}

/// Extract the bearer token from request headers
///
/// The scheme is matched case-insensitively. An empty token counts as missing.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?
        .trim();

    if value.eq_ignore_ascii_case(BEARER_PREFIX.trim_end()) {
        return Err(BearerError::Missing);
    }

    let (scheme, token) = value.split_at_checked(BEARER_PREFIX.len()).ok_or(BearerError::Malformed)?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return Err(BearerError::Malformed);
    }

    match token.trim() {
        "" => Err(BearerError::Missing),
        token => Ok(token),
    }
}

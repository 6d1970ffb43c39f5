//! Authenticated Identity
//!
//! The caller resolved from a verified access token. Produced by the
//! authorization gate and handed explicitly to downstream operations.

use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
}

impl AuthenticatedIdentity {
    /// Whether this caller is the given user
    pub fn is(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

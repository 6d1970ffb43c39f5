//! User Entity
//!
//! A registered account: profile fields, credential hash and the collection
//! of currently-valid refresh tokens.

use chrono::{DateTime, Utc};

use crate::domain::entity::identity::AuthenticatedIdentity;
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};

/// User entity
///
/// A refresh token is valid if and only if it is present in
/// `refresh_tokens`; removing it is the only way to revoke it.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique)
    pub user_name: UserName,
    /// Email (unique, lower-cased)
    pub email: Email,
    /// Argon2id hash
    pub password_hash: UserPassword,
    /// Currently-valid refresh tokens, oldest first
    pub refresh_tokens: Vec<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with an empty token collection
    pub fn new(user_name: UserName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            refresh_tokens: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_refresh_token(&self, token: &str) -> bool {
        self.refresh_tokens.iter().any(|t| t == token)
    }

    pub fn add_refresh_token(&mut self, token: String) {
        self.refresh_tokens.push(token);
        self.updated_at = Utc::now();
    }

    /// Remove every occurrence of `token`; no-op if absent
    pub fn revoke_refresh_token(&mut self, token: &str) {
        self.refresh_tokens.retain(|t| t != token);
        self.updated_at = Utc::now();
    }

    /// Swap `old` for `new` in one step
    pub fn rotate_refresh_token(&mut self, old: &str, new: String) {
        self.refresh_tokens.retain(|t| t != old);
        self.refresh_tokens.push(new);
        self.updated_at = Utc::now();
    }

    /// Update profile fields; `None` leaves the field unchanged
    pub fn update_profile(&mut self, user_name: Option<UserName>, email: Option<Email>) {
        if let Some(user_name) = user_name {
            self.user_name = user_name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        self.updated_at = Utc::now();
    }

    pub fn identity(&self) -> AuthenticatedIdentity {
        AuthenticatedIdentity {
            user_id: self.user_id,
            user_name: self.user_name.clone(),
            email: self.email.clone(),
        }
    }
}

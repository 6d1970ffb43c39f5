//! In-Memory Repository Implementation
//!
//! Used by tests and when no database is configured. Enforces the same
//! uniqueness rules as the `users` table and the same whole-record
//! overwrite semantics on update.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// In-memory auth repository; clones share the same store
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn conflicts(existing: &User, candidate: &User) -> bool {
    existing.user_id != candidate.user_id
        && (existing.email == candidate.email || existing.user_name == candidate.user_name)
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| conflicts(u, user) || u.user_id == user.user_id) {
            return Err(AuthError::UserAlreadyExists);
        }

        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.user_id == user_id).cloned())
    }

    async fn find_by_ids(&self, user_ids: &[UserId]) -> AuthResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| user_ids.contains(&u.user_id))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email_or_user_name(
        &self,
        email: &Email,
        user_name: &UserName,
    ) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .any(|u| &u.email == email || &u.user_name == user_name))
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn update(&self, user: &User) -> AuthResult<bool> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| conflicts(u, user)) {
            return Err(AuthError::UserAlreadyExists);
        }

        match users.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| &u.user_id != user_id);
        Ok(users.len() != before)
    }
}

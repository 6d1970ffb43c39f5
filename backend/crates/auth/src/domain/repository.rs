//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
///
/// `update` writes the whole record: two concurrent read-modify-write
/// sequences on one user resolve as last write wins.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; a duplicate user name or email is `UserAlreadyExists`
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find every user whose ID is in `user_ids` (order unspecified)
    async fn find_by_ids(&self, user_ids: &[UserId]) -> AuthResult<Vec<User>>;

    /// Find user by normalised email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check whether any user has this email or this user name
    async fn exists_by_email_or_user_name(
        &self,
        email: &Email,
        user_name: &UserName,
    ) -> AuthResult<bool>;

    /// All users, oldest first
    async fn list_all(&self) -> AuthResult<Vec<User>>;

    /// Overwrite a user; returns `false` if it no longer exists
    async fn update(&self, user: &User) -> AuthResult<bool>;

    /// Delete a user; returns `false` if it did not exist
    async fn delete(&self, user_id: &UserId) -> AuthResult<bool>;
}

use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;

/// Storage for user records.
///
/// Implementations enforce the `users` table constraints: a second insert
/// with an existing email fails with [`DomainError::DuplicateEmail`] and a
/// role outside the three known values fails with
/// [`DomainError::InvalidRole`].
///
/// [`DomainError::DuplicateEmail`]: crate::domain::error::DomainError::DuplicateEmail
/// [`DomainError::InvalidRole`]: crate::domain::error::DomainError::InvalidRole
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;
}

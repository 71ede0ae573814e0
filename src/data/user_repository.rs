use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, Role, User};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace, warn};

#[derive(Default)]
struct Storage {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

/// Process-local user storage with the same constraints as the `users` table.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let role: Role = user.role.parse().inspect_err(|_| {
            warn!(role = %user.role, "Role rejected by storage constraint");
        })?;

        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;
        if storage.users.values().any(|u| u.email == user.email) {
            warn!(email = %user.email, "Email rejected by unique constraint");
            return Err(DomainError::DuplicateEmail(user.email).into());
        }

        storage.next_id += 1;
        let stored = User {
            id: storage.next_id,
            name: user.name,
            email: user.email,
            password: user.password,
            role,
        };
        storage.users.insert(stored.id, stored.clone());
        debug!(user_id = stored.id, email = %stored.email, "User saved to memory storage");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        let user = storage.users.values().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(user_id = u.id, "User found in storage"),
            None => trace!("User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let storage = self.storage.read().await;
        Ok(storage.users.get(&id).cloned())
    }
}

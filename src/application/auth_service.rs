use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User, UserSignup};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, instrument, trace, warn};
use validator::Validate;

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Validates the signup shape and stores a new user. The role string is
    /// passed through untouched; the repository decides whether it is known.
    #[instrument(skip(self, req), fields(email = %req.email, role = %req.role))]
    pub async fn signup(&self, req: UserSignup) -> Result<User> {
        trace!("Starting user signup");

        req.validate().map_err(|e| {
            warn!(error = %e, "Signup payload failed validation");
            DomainError::Validation(e.to_string())
        })?;

        let new_user = NewUser {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        };

        debug!("Saving user to repository");
        let user = self.user_repository.insert_user(new_user).await?;

        info!(user_id = user.id, role = %user.role, "User signed up");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.user_repository
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = id, "User not found");
                DomainError::NotFound(format!("User not found: {}", id)).into()
            })
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repository.find_user_by_email(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::InMemoryUserRepository;
    use crate::domain::user::Role;

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn signup(email: &str, role: &str) -> UserSignup {
        UserSignup {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_stores_user() {
        let service = service();

        let user = service.signup(signup("ada@example.com", "admin")).await.unwrap();
        assert_eq!(user.role, Role::Admin);

        let found = service.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(service.get_user(user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_signup_invalid_email_never_reaches_storage() {
        let service = service();

        let err = service.signup(signup("not-an-email", "student")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
        assert!(service.find_by_email("not-an-email").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email_fails() {
        let service = service();
        service.signup(signup("dup@example.com", "student")).await.unwrap();

        let err = service.signup(signup("dup@example.com", "owner")).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_get_user_missing_is_not_found() {
        let err = service().get_user(99).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }
}

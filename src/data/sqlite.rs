use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::error::ErrorKind;
use tracing::{debug, instrument, warn};

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: String,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            role: row.role.parse()?,
        })
    }
}

/// User storage backed by the `users` table.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Maps constraint violations on `users` to domain errors; everything else
/// stays a storage error.
fn map_insert_error(err: sqlx::Error, user: &NewUser) -> anyhow::Error {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                warn!(email = %user.email, "Email rejected by unique constraint");
                return DomainError::DuplicateEmail(user.email.clone()).into();
            }
            ErrorKind::CheckViolation => {
                warn!(role = %user.role, "Role rejected by storage constraint");
                return DomainError::InvalidRole(user.role.clone()).into();
            }
            _ => {}
        }
    }
    anyhow::Error::new(err).context("Failed to insert user")
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (name, email, password, role) VALUES (?, ?, ?, ?) \
             RETURNING id, name, email, password, role",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_insert_error(e, &user))?;

        debug!(user_id = row.id, "User row inserted");
        Ok(User::try_from(row)?)
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::try_from).transpose()?)
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, role FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::try_from).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::infrastructure::database::{connect, init_db};

    async fn repository() -> SqliteUserRepository {
        let pool = connect("sqlite::memory:").await.unwrap();
        init_db(&pool).await.unwrap();
        SqliteUserRepository::new(pool)
    }

    fn new_user(email: &str, role: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_user() {
        let repo = repository().await;

        let user = repo.insert_user(new_user("ada@example.com", "owner")).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, Role::Owner);

        let by_email = repo.find_user_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(by_email, user);
        let by_id = repo.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id, user);
    }

    #[tokio::test]
    async fn test_second_insert_with_same_email_fails() {
        let repo = repository().await;
        repo.insert_user(new_user("same@example.com", "student")).await.unwrap();

        let err = repo
            .insert_user(new_user("same@example.com", "student"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::DuplicateEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_role_outside_enumeration_rejected_by_check_constraint() {
        let repo = repository().await;

        let err = repo
            .insert_user(new_user("x@example.com", "landlord"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidRole(role)) if role == "landlord"
        ));
        assert!(repo.find_user_by_email("x@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_missing_user_returns_none() {
        let repo = repository().await;
        assert!(repo.find_user_by_id(7).await.unwrap().is_none());
        assert!(repo.find_user_by_email("nobody@example.com").await.unwrap().is_none());
    }
}

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Permission category of a user. Stored as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Owner,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Owner, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Owner => "owner",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| DomainError::InvalidRole(s.to_string()))
    }
}

/// A persisted user record.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Insert payload for a user. The role is carried as the raw string from
/// the request; membership in [`Role`] is enforced by the storage layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

fn default_role() -> String {
    Role::default().as_str().to_string()
}

/// Signup payload.
///
/// `role` is accepted as any string here; it is only checked against
/// [`Role`] by the storage layer when the record is written.
#[derive(Debug, Clone, Validate, Deserialize, Serialize)]
pub struct UserSignup {
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Clone, Validate, Deserialize, Serialize)]
pub struct UserLogin {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_default_is_student() {
        assert_eq!(Role::default(), Role::Student);
    }

    #[test]
    fn test_role_parses_known_values() {
        assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_rejects_unknown_and_mixed_case() {
        assert!(matches!(
            "landlord".parse::<Role>(),
            Err(DomainError::InvalidRole(r)) if r == "landlord"
        ));
        assert!("Owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_signup_defaults_role_to_student() {
        let signup: UserSignup = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter2"
        }))
        .unwrap();

        assert!(signup.validate().is_ok());
        assert_eq!(signup.role, "student");
    }

    #[test]
    fn test_signup_keeps_role_string_unchecked() {
        let signup: UserSignup = serde_json::from_value(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter2",
            "role": "landlord"
        }))
        .unwrap();

        assert!(signup.validate().is_ok());
        assert_eq!(signup.role, "landlord");
    }

    #[test]
    fn test_signup_rejects_invalid_email() {
        let signup: UserSignup = serde_json::from_value(json!({
            "name": "Ada",
            "email": "not-an-email",
            "password": "hunter2"
        }))
        .unwrap();

        let errors = signup.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_signup_missing_field_fails_to_parse() {
        let result = serde_json::from_value::<UserSignup>(json!({
            "email": "ada@example.com",
            "password": "hunter2"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_login_validates_email() {
        let login = UserLogin {
            email: "ada.example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(login.validate().is_err());

        let login = UserLogin {
            email: "ada@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(login.validate().is_ok());
    }
}

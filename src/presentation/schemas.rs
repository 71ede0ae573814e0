use crate::domain::user::{Role, User};
use serde::{Deserialize, Serialize};

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Public view of a user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserResponse,
}

impl TokenResponse {
    pub fn bearer(access_token: String, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: default_token_type(),
            user,
        }
    }
}

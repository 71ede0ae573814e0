use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

use thiserror::Error;

use crate::domain::auth::errors::StoreError;

/// Error for user administration operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("user not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Password(#[from] auth::PasswordError),

    #[error("store error: {0}")]
    Store(String),
}

impl From<StoreError> for UserError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameAlreadyExists(name) => UserError::UsernameAlreadyExists(name),
            StoreError::EmailAlreadyExists(email) => UserError::EmailAlreadyExists(email),
            StoreError::NotFound(what) => UserError::NotFound(what),
            other => UserError::Store(other.to_string()),
        }
    }
}

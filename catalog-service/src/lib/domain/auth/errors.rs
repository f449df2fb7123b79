use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for role name parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("unknown role: {0}")]
    Unknown(String),
}

/// Errors surfaced by the credential store port.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("record not found: {0}")]
    NotFound(String),

    /// Stored data that no longer parses into domain types (bad email,
    /// unknown role name). Indicates the store was written outside the
    /// service's invariants.
    #[error("corrupt stored record: {0}")]
    Corrupt(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Errors surfaced by the reset notifier port.
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("failed to send reset message: {0}")]
    SendFailed(String),
}

/// Top-level error for authentication, authorization, and reset flows.
///
/// The first four variants are deliberately information-free towards
/// clients: login failures never reveal whether the username exists, and
/// reset-token failures never distinguish absent from used from expired.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    BadCredentials,

    #[error("invalid or expired reset token")]
    ResetTokenInvalid,

    #[error("authentication required")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error(transparent)]
    Password(#[from] auth::PasswordError),

    #[error(transparent)]
    Token(#[from] auth::TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Notifier(#[from] NotifierError),
}

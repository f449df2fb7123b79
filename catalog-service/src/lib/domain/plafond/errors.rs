use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlafondIdError {
    #[error("invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error)]
pub enum PlafondError {
    #[error("invalid plafond id: {0}")]
    InvalidId(#[from] PlafondIdError),

    #[error("plafond not found: {0}")]
    NotFound(String),

    #[error("plafond name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("database error: {0}")]
    DatabaseError(String),
}

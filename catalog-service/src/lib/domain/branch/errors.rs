use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BranchIdError {
    #[error("invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error)]
pub enum BranchError {
    #[error("invalid branch id: {0}")]
    InvalidId(#[from] BranchIdError),

    #[error("branch not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    DatabaseError(String),
}

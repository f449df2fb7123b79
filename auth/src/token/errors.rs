use thiserror::Error;

/// Error type for bearer-token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token is expired")]
    Expired,
}

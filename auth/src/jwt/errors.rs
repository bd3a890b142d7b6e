use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature does not match")]
    SignatureMismatch,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

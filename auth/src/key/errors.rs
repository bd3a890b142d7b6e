use thiserror::Error;

/// Error type for signing key loading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Signing key is not configured")]
    Missing,

    #[error("Signing key is not valid base64: {0}")]
    InvalidEncoding(String),

    #[error("Signing key too short: got {actual} bytes, need at least {minimum}")]
    TooShort { actual: usize, minimum: usize },
}

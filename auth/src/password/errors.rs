use thiserror::Error;

/// Error type for password hashing and comparison.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash unusable: {0}")]
    VerificationFailed(String),
}

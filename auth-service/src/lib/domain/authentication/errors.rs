use auth::TokenError;
use thiserror::Error;

use crate::user::errors::UserError;
use crate::user::errors::ValidationErrors;

/// Failures of the signup, login and authorize flows.
///
/// Variants stay specific for logging; the HTTP layer decides how much of each one
/// a client gets to see.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Email is already in use")]
    EmailTaken,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing or malformed Authorization header")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Token subject is not an active user: {0}")]
    UnknownSubject(String),

    #[error("Missing required role")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(errors) => AuthError::Validation(errors),
            UserError::UsernameAlreadyExists(_) => AuthError::UsernameTaken,
            UserError::EmailAlreadyExists(_) => AuthError::EmailTaken,
            UserError::NotFoundByUsername(_) => AuthError::InvalidCredentials,
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

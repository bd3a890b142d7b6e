use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;

/// Port for the authentication flow driven by the HTTP layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user. No token is issued.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `EmailTaken` - Email is already registered
    /// * `Internal` - User store failure
    async fn signup(&self, command: CreateUserCommand) -> Result<User, AuthError>;

    /// Check credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password (indistinguishable)
    /// * `Internal` - User store or token encoding failure
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError>;

    /// Validate a raw `Authorization` header value and return the token subject.
    ///
    /// # Errors
    /// * `MissingToken` - Header absent or not a `Bearer ` credential
    /// * `InvalidToken` - Token malformed, forged or expired
    fn validate_bearer(&self, authorization: Option<&str>) -> Result<String, AuthError>;

    /// Validate the header and resolve the subject to the identity to attach to the
    /// request.
    ///
    /// # Errors
    /// * `MissingToken` - Header absent or not a `Bearer ` credential
    /// * `InvalidToken` - Token malformed, forged or expired
    /// * `UnknownSubject` - Token is valid but its user no longer exists or is disabled
    async fn authorize(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, AuthError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenProvider;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthResult;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::LoginOutcome;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::authentication::verifier::CredentialVerifier;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::ValidationErrors;
use crate::user::ports::UserServicePort;

const BEARER_PREFIX: &str = "Bearer ";

/// Orchestrates signup, login and bearer-token checks on top of the user store
/// and the token provider.
pub struct AuthService<US>
where
    US: UserServicePort,
{
    users: Arc<US>,
    verifier: CredentialVerifier<US>,
    tokens: Arc<TokenProvider>,
}

impl<US> AuthService<US>
where
    US: UserServicePort,
{
    pub fn new(users: Arc<US>, tokens: Arc<TokenProvider>) -> Self {
        Self {
            verifier: CredentialVerifier::new(Arc::clone(&users)),
            users,
            tokens,
        }
    }

    fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
        authorization
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MissingToken)
    }
}

#[async_trait]
impl<US> AuthServicePort for AuthService<US>
where
    US: UserServicePort,
{
    async fn signup(&self, command: CreateUserCommand) -> Result<User, AuthError> {
        if self.users.username_exists(&command.username).await? {
            return Err(AuthError::UsernameTaken);
        }
        if self.users.email_exists(&command.email).await? {
            return Err(AuthError::EmailTaken);
        }

        // The store enforces uniqueness again for concurrent signups
        let user = self.users.create_user(command).await?;
        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AuthError> {
        let mut errors = ValidationErrors::new();
        if command.username.trim().is_empty() {
            errors.add("username", "Username is required");
        }
        if command.password.trim().is_empty() {
            errors.add("password", "Password is required");
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let user = match self
            .verifier
            .verify(&command.username, &command.password)
            .await?
        {
            AuthResult::Authenticated(user) => user,
            AuthResult::UserNotFound => {
                tracing::warn!(username = %command.username, "Login failed: user not found");
                return Err(AuthError::InvalidCredentials);
            }
            AuthResult::BadCredentials => {
                tracing::warn!(username = %command.username, "Login failed: bad credentials");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self
            .tokens
            .issue(user.username.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(LoginOutcome {
            token,
            token_type: LoginOutcome::TOKEN_TYPE,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            expires_in: self.tokens.validity().num_milliseconds(),
        })
    }

    fn validate_bearer(&self, authorization: Option<&str>) -> Result<String, AuthError> {
        let token = Self::bearer_token(authorization)?;
        let claims = self.tokens.verify(token)?;
        Ok(claims.sub)
    }

    async fn authorize(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
        let token = Self::bearer_token(authorization)?;
        let claims = self.tokens.verify(token)?;

        let Ok(username) = Username::new(claims.sub.clone()) else {
            return Err(AuthError::UnknownSubject(claims.sub));
        };

        match self.users.find_user_by_username(&username).await? {
            Some(user) if user.enabled => Ok(AuthenticatedUser::from_user(&user)),
            _ => Err(AuthError::UnknownSubject(claims.sub)),
        }
    }
}

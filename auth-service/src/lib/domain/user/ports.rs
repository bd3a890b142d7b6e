use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for the user store consumed by the authentication flow.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Hash the password and persist a new user with the default role.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Look a user up by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_user_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    async fn username_exists(&self, username: &Username) -> Result<bool, UserError>;

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserError>;

    /// Compare a plaintext password against the user's stored hash.
    ///
    /// Runs the slow hash every time; results are never cached.
    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, UserError>;

    /// Run one hash comparison against a fixed hash that matches no password.
    ///
    /// Login paths that reject without a stored hash call this so they cost the same
    /// as a wrong password.
    async fn verify_dummy_password(&self, password: &str) -> Result<(), UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    async fn exists_by_username(&self, username: &Username) -> Result<bool, UserError>;

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError>;
}

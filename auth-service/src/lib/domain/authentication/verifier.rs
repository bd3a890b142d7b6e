use std::sync::Arc;

use crate::domain::authentication::models::AuthResult;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// Checks a username/password pair against the user store.
///
/// Every call performs a fresh lookup and hash comparison.
pub struct CredentialVerifier<US>
where
    US: UserServicePort,
{
    users: Arc<US>,
}

impl<US> CredentialVerifier<US>
where
    US: UserServicePort,
{
    pub fn new(users: Arc<US>) -> Self {
        Self { users }
    }

    /// Rejections without a stored hash still pay for one hash comparison, so the
    /// outcome cannot be told apart by response time.
    ///
    /// # Errors
    /// * `UserError` - The store lookup or hash comparison failed
    pub async fn verify(&self, username: &str, password: &str) -> Result<AuthResult, UserError> {
        // A name that could never have been registered cannot exist
        let Ok(username) = Username::new(username.to_string()) else {
            self.users.verify_dummy_password(password).await?;
            return Ok(AuthResult::UserNotFound);
        };

        let Some(user) = self.users.find_user_by_username(&username).await? else {
            self.users.verify_dummy_password(password).await?;
            return Ok(AuthResult::UserNotFound);
        };

        if !user.enabled {
            self.users.verify_dummy_password(password).await?;
            return Ok(AuthResult::BadCredentials);
        }

        if self.users.verify_password(&user, password).await? {
            Ok(AuthResult::Authenticated(user))
        } else {
            Ok(AuthResult::BadCredentials)
        }
    }
}

use std::collections::BTreeSet;
use std::fmt;

use crate::domain::user::models::Role;
use crate::domain::user::models::User;

/// Outcome of checking a username/password pair.
#[derive(Debug, Clone)]
pub enum AuthResult {
    Authenticated(User),
    UserNotFound,
    BadCredentials,
}

/// Raw login input; the password is only ever compared, never kept.
#[derive(Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub token: String,
    pub token_type: &'static str,
    pub username: String,
    pub email: String,
    /// Token validity window in milliseconds
    pub expires_in: i64,
}

impl LoginOutcome {
    pub const TOKEN_TYPE: &'static str = "Bearer";
}

/// Identity attached to a request once its bearer token has been accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub roles: BTreeSet<Role>,
}

impl AuthenticatedUser {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.as_str().to_string(),
            roles: user.roles.clone(),
        }
    }

    /// True when every role in `required` has been granted.
    pub fn has_roles(&self, required: &[&str]) -> bool {
        required
            .iter()
            .all(|name| self.roles.iter().any(|role| role.as_str() == *name))
    }

    pub fn authorities(&self) -> Vec<String> {
        self.roles
            .iter()
            .map(|role| format!("ROLE_{}", role))
            .collect()
    }
}

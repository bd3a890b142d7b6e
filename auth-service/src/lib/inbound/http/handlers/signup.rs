use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;
use crate::user::errors::ValidationErrors;

pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserProfileData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::CREATED,
                "User registered successfully",
                user.into(),
            )
        })
}

/// HTTP request body for registering a user (raw JSON).
///
/// Absent fields deserialize as empty strings so they are reported per field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    password: String,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let username = errors.check("username", Username::new(self.username));
        let email = errors.check("email", EmailAddress::new(self.email));
        let full_name = errors.check("fullName", FullName::new(self.full_name));
        let password = errors.check("password", Password::new(self.password));

        match (username, email, full_name, password) {
            (Some(username), Some(email), Some(full_name), Some(password)) => Ok(
                CreateUserCommand::new(username, email, full_name, password),
            ),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfileData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            full_name: user.full_name.as_str().to_string(),
            enabled: user.enabled,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::require_roles;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::user::models::Role;

const REQUIRED_ROLES: &[&str] = &[Role::USER];

pub async fn user_info(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserInfoData>, ApiError> {
    require_roles(&user, REQUIRED_ROLES)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "User info retrieved",
        UserInfoData {
            authorities: user.authorities(),
            username: user.username,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfoData {
    pub username: String,
    pub authorities: Vec<String>,
}

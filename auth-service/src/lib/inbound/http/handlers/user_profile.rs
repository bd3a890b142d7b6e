use axum::http::StatusCode;
use axum::Extension;

use super::require_roles;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::domain::user::models::Role;

const REQUIRED_ROLES: &[&str] = &[Role::USER];

pub async fn user_profile(
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<String>, ApiError> {
    require_roles(&user, REQUIRED_ROLES)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        "User profile retrieved",
        user.username,
    ))
}

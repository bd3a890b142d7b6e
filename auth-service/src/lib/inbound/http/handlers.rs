use std::collections::BTreeMap;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AuthenticatedUser;
use crate::user::errors::ValidationErrors;

pub mod login;
pub mod public;
pub mod signup;
pub mod user_info;
pub mod user_profile;
pub mod validate_token;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, Some(data))))
    }
}

impl ApiSuccess<()> {
    /// Success envelope carrying only a message.
    pub fn message(status: StatusCode, message: &str) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(message, None)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest {
        message: String,
        errors: Option<BTreeMap<String, String>>,
    },
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            errors: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::BadRequest { message, errors } => (StatusCode::BAD_REQUEST, message, errors),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
        };

        (status, Json(ApiResponseBody::<()>::new_error(message, errors))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(errors) => errors.into(),
            AuthError::UsernameTaken | AuthError::EmailTaken => ApiError::bad_request(err.to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid username or password".to_string())
            }
            AuthError::MissingToken => ApiError::Unauthorized("Invalid token format".to_string()),
            AuthError::InvalidToken(_) | AuthError::UnknownSubject(_) => {
                ApiError::Unauthorized("Invalid token".to_string())
            }
            AuthError::Forbidden => ApiError::Forbidden("Access denied".to_string()),
            AuthError::Internal(reason) => {
                tracing::error!(error = %reason, "Request failed");
                ApiError::InternalServerError("An unexpected error occurred".to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest {
            message: "Validation failed".to_string(),
            errors: Some(errors.into_fields()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Reject with 403 unless the caller holds every role in `required`.
pub fn require_roles(user: &AuthenticatedUser, required: &[&str]) -> Result<(), ApiError> {
    if user.has_roles(required) {
        Ok(())
    } else {
        tracing::warn!(
            username = %user.username,
            required = ?required,
            "Access denied: missing role"
        );
        Err(AuthError::Forbidden.into())
    }
}

/// Envelope shared by every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, String>>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(message: &str, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
            errors: None,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn new_error(message: String, errors: Option<BTreeMap<String, String>>) -> Self {
        Self {
            success: false,
            message,
            data: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenError;

    use super::*;
    use crate::domain::user::models::Role;

    #[test]
    fn test_login_failures_share_one_message() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized("Invalid username or password".to_string())
        );
    }

    #[test]
    fn test_token_failures_share_one_message() {
        let expected = ApiError::Unauthorized("Invalid token".to_string());

        for err in [
            AuthError::InvalidToken(TokenError::TokenExpired),
            AuthError::InvalidToken(TokenError::SignatureMismatch),
            AuthError::InvalidToken(TokenError::MalformedToken("segments".to_string())),
            AuthError::UnknownSubject("ghost".to_string()),
        ] {
            assert_eq!(ApiError::from(err), expected);
        }
    }

    #[test]
    fn test_validation_errors_keep_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "Username is required");

        let ApiError::BadRequest { errors, .. } = ApiError::from(AuthError::Validation(errors))
        else {
            panic!("expected bad request");
        };
        assert_eq!(
            errors.unwrap().get("username").map(String::as_str),
            Some("Username is required")
        );
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let err = ApiError::from(AuthError::Internal("pool timed out".to_string()));

        assert_eq!(
            err,
            ApiError::InternalServerError("An unexpected error occurred".to_string())
        );
    }

    #[test]
    fn test_require_roles() {
        let user = AuthenticatedUser {
            username: "testuser".to_string(),
            roles: [Role::user()].into_iter().collect(),
        };

        assert!(require_roles(&user, &[Role::USER]).is_ok());
        assert!(matches!(
            require_roles(&user, &["ADMIN"]),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let body = serde_json::to_value(ApiResponseBody::<()>::new("Application is running", None))
            .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"success": true, "message": "Application is running"})
        );
    }
}

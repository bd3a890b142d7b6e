use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Check the bearer token in the `Authorization` header and echo its subject.
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<String>, ApiError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let username = state.auth.validate_bearer(authorization).map_err(|e| {
        tracing::debug!(error = %e, "Token validation failed");
        ApiError::from(e)
    })?;

    Ok(ApiSuccess::new(StatusCode::OK, "Token is valid", username))
}

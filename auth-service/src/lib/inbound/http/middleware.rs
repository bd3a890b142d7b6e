use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::authentication::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that accepts a bearer token and attaches the caller's
/// [`AuthenticatedUser`](crate::domain::authentication::models::AuthenticatedUser)
/// to the request extensions.
///
/// Requests without a usable token are answered with 401 before any protected
/// handler runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let user = state
        .auth
        .authorize(authorization.as_deref())
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Bearer authentication failed");
            ApiError::from(e).into_response()
        })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

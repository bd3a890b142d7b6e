use axum::http::StatusCode;

use super::ApiSuccess;

pub async fn health() -> ApiSuccess<()> {
    ApiSuccess::message(StatusCode::OK, "Application is running")
}

pub async fn info() -> ApiSuccess<String> {
    ApiSuccess::new(
        StatusCode::OK,
        "JWT Authentication Service",
        format!("Version: {}", env!("CARGO_PKG_VERSION")),
    )
}

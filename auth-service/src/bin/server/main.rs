use std::sync::Arc;

use auth::TokenProvider;
use auth_service::authentication::ports::AuthServicePort;
use auth_service::authentication::service::AuthService;
use auth_service::config::Config;
use auth_service::inbound::http::router::create_router;
use auth_service::repositories::InMemoryUserRepository;
use auth_service::repositories::PostgresUserRepository;
use auth_service::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        expiration_hours = config.jwt.expiration_hours,
        database = config.database.is_some(),
        "Configuration loaded"
    );

    // Refuse to start without a usable signing key
    let signing_key = config.jwt.signing_key()?;
    let tokens = Arc::new(TokenProvider::new(signing_key, config.jwt.validity()));

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            let user_service = Arc::new(UserService::new(user_repository));
            Arc::new(AuthService::new(user_service, Arc::clone(&tokens)))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory only");

            let user_repository = Arc::new(InMemoryUserRepository::new());
            let user_service = Arc::new(UserService::new(user_repository));
            Arc::new(AuthService::new(user_service, Arc::clone(&tokens)))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    tracing::info!("Server exited");
    Ok(())
}

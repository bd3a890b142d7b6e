use std::sync::Arc;

use auth::SigningKey;
use auth::TokenProvider;
use auth_service::authentication::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::repositories::InMemoryUserRepository;
use auth_service::user::service::UserService;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-token-signing-at-least-64-bytes-long-padding!";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub tokens: Arc<TokenProvider>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let key = SigningKey::new(TEST_SECRET).expect("Test key is long enough");
        let tokens = Arc::new(TokenProvider::new(key, Duration::hours(24)));

        let user_repository = Arc::new(InMemoryUserRepository::new());
        let user_service = Arc::new(UserService::new(user_repository));
        let auth_service = Arc::new(AuthService::new(user_service, Arc::clone(&tokens)));

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user with a valid payload
    pub async fn signup(&self, username: &str, email: &str) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(&json!({
                "username": username,
                "email": email,
                "fullName": "Test User",
                "password": "TestPassword123"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user and log in, returning the issued token
    pub async fn signup_and_login(&self, username: &str, email: &str) -> String {
        self.signup(username, email).await;

        let response = self
            .post("/api/auth/login")
            .json(&json!({
                "username": username,
                "password": "TestPassword123"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Login response carries a token")
            .to_string()
    }
}

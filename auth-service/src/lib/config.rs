use std::env;

use auth::KeyError;
use auth::SigningKey;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

/// Token settings. `secret` is the base64 signing key and has no default.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

fn default_http_port() -> u16 {
    8080
}

fn default_expiration_hours() -> i64 {
    auth::TokenProvider::DEFAULT_VALIDITY_HOURS
}

impl JwtConfig {
    /// Upper bound on `expiration_hours`, one year.
    pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

    /// Decode the configured signing key.
    ///
    /// # Errors
    /// * `KeyError` - Secret is blank, not base64, or shorter than 256 bits
    pub fn signing_key(&self) -> Result<SigningKey, KeyError> {
        SigningKey::from_base64(&self.secret)
    }

    pub fn validity(&self) -> Duration {
        Duration::hours(self.expiration_hours)
    }

    /// Reject a validity window that would expire tokens on issue or overflow time math.
    ///
    /// # Errors
    /// * `ConfigError::Message` - `expiration_hours` is outside `1..=MAX_EXPIRATION_HOURS`
    pub fn check_expiration(&self) -> Result<(), ConfigError> {
        if (1..=Self::MAX_EXPIRATION_HOURS).contains(&self.expiration_hours) {
            Ok(())
        } else {
            Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be between 1 and {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )))
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, DATABASE__URL, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Fails when no signing key is configured or the token lifetime is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_configuration(configuration)
    }

    fn from_configuration(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Self = configuration.try_deserialize()?;
        config.jwt.check_expiration()?;
        Ok(config)
    }
}

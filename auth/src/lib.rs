//! Token and credential primitives for the authentication service.
//!
//! - Signing key material (loading, generation)
//! - Compact HS512 token codec
//! - Token provider: issue, verify, extract subject
//! - Password hashing (Argon2id)
//!
//! The service crate owns users and the authentication flow; this crate only knows
//! about keys, tokens and hashes.
//!
//! # Examples
//!
//! ## Tokens
//! ```
//! use auth::{SigningKey, TokenProvider};
//! use chrono::Duration;
//!
//! let key = SigningKey::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let provider = TokenProvider::new(key, Duration::hours(24));
//!
//! let token = provider.issue("alice").unwrap();
//! assert!(provider.validate(&token));
//! assert_eq!(provider.extract_subject(&token).unwrap(), "alice");
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```

pub mod jwt;
pub mod key;
pub mod password;

pub use jwt::Claims;
pub use jwt::Clock;
pub use jwt::FixedClock;
pub use jwt::SystemClock;
pub use jwt::TokenError;
pub use jwt::TokenProvider;
pub use key::generate_secret;
pub use key::KeyError;
pub use key::SigningKey;
pub use password::PasswordError;
pub use password::PasswordHasher;

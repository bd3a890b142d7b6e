use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use subtle::ConstantTimeEq;

use super::claims::Claims;
use super::claims::ALGORITHM;
use super::clock::Clock;
use super::clock::SystemClock;
use super::codec;
use super::errors::TokenError;
use crate::key::SigningKey;

/// Issues and verifies signed, time-limited bearer tokens.
///
/// Holds no mutable state; a single instance is shared by every request.
pub struct TokenProvider {
    key: SigningKey,
    validity: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenProvider {
    /// Default validity window in hours.
    pub const DEFAULT_VALIDITY_HOURS: i64 = 24;

    /// Create a provider reading the wall clock.
    ///
    /// # Arguments
    /// * `key` - Signing key loaded at startup
    /// * `validity` - How long issued tokens are accepted
    pub fn new(key: SigningKey, validity: Duration) -> Self {
        Self::with_clock(key, validity, Arc::new(SystemClock))
    }

    /// Create a provider reading time from `clock`.
    pub fn with_clock(key: SigningKey, validity: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            key,
            validity,
            clock,
        }
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Issue a token for `subject`, valid from now for the configured window.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims::new(subject, self.clock.now(), self.validity);
        codec::encode(&claims, &self.key)
    }

    /// Decode a token and check signature and expiry.
    ///
    /// Accepts exactly the tokens [`validate`](Self::validate) accepts, and the returned
    /// `sub` is what [`extract_subject`](Self::extract_subject) reads. Callers that need
    /// both the verdict and the subject use this in place of the pair, which also keeps
    /// the rejection reason.
    ///
    /// # Errors
    /// * `MalformedToken` - Token cannot be parsed
    /// * `SignatureMismatch` - Wrong algorithm or signature not produced by this key
    /// * `TokenExpired` - Signature is good but the validity window has passed
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let decoded = codec::decode(token)?;

        if decoded.header.alg != ALGORITHM {
            return Err(TokenError::SignatureMismatch);
        }

        let expected = codec::sign(decoded.signing_input().as_bytes(), &self.key)?;
        if !bool::from(expected.as_slice().ct_eq(decoded.signature())) {
            return Err(TokenError::SignatureMismatch);
        }

        if decoded.claims.is_expired(self.clock.now().timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(decoded.claims)
    }

    /// Whether the token is well-formed, signed by this key, and unexpired.
    ///
    /// Never fails; the reason for a rejection is only logged.
    pub fn validate(&self, token: &str) -> bool {
        match self.verify(token) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(reason = %e, "Token rejected");
                false
            }
        }
    }

    /// Read the subject claim. Only meaningful after [`validate`](Self::validate).
    ///
    /// # Errors
    /// * `MalformedToken` - Token cannot be parsed
    pub fn extract_subject(&self, token: &str) -> Result<String, TokenError> {
        codec::decode(token).map(|decoded| decoded.claims.sub)
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("key", &self.key)
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}

use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Signing algorithm written into every header.
pub const ALGORITHM: &str = "HS512";

/// Token header segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub alg: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    pub fn hs512() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}

/// Token claims.
///
/// `sub`, `iat` and `exp` are mandatory; anything else the token carries is kept in
/// `extra`. The ordered map keeps serialization deterministic so that the same claims
/// always produce the same signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Extension claims (flattened into token)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at` and valid for `validity`.
    ///
    /// An expiry past the representable date range saturates to `i64::MAX`.
    pub fn new(subject: impl ToString, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        let exp = issued_at
            .checked_add_signed(validity)
            .map_or(i64::MAX, |expires_at| expires_at.timestamp());

        Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp,
            extra: BTreeMap::new(),
        }
    }

    /// A token is usable strictly before its expiration instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

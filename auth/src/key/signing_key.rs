use std::fmt;
use std::sync::Arc;

use argon2::password_hash::rand_core::CryptoRng;
use argon2::password_hash::rand_core::RngCore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::errors::KeyError;

/// Symmetric secret used to sign and verify tokens.
///
/// Loaded once at startup and shared read-only afterwards; cloning only bumps a
/// reference count.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Minimum accepted key length in bytes (256 bits).
    pub const MIN_LENGTH: usize = 32;

    /// Length of keys produced by [`generate_secret`] in bytes (512 bits).
    pub const GENERATED_LENGTH: usize = 64;

    /// Create a signing key from raw bytes.
    ///
    /// # Errors
    /// * `Missing` - No bytes were supplied
    /// * `TooShort` - Fewer than 32 bytes were supplied
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self, KeyError> {
        let bytes = bytes.as_ref();
        if bytes.is_empty() {
            return Err(KeyError::Missing);
        }
        if bytes.len() < Self::MIN_LENGTH {
            return Err(KeyError::TooShort {
                actual: bytes.len(),
                minimum: Self::MIN_LENGTH,
            });
        }

        Ok(Self {
            bytes: Arc::from(bytes),
        })
    }

    /// Decode a signing key from its base64 configuration form.
    ///
    /// # Errors
    /// * `Missing` - The configured value is blank
    /// * `InvalidEncoding` - The value is not standard base64
    /// * `TooShort` - The decoded key is shorter than 32 bytes
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(KeyError::Missing);
        }

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;

        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("length", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Generate a fresh 512-bit secret, base64 encoded for configuration storage.
///
/// The random source is supplied by the caller so nothing process-wide is kept.
pub fn generate_secret<R: RngCore + CryptoRng>(rng: &mut R) -> String {
    let mut bytes = [0u8; SigningKey::GENERATED_LENGTH];
    rng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::rand_core::OsRng;

    use super::*;

    #[test]
    fn test_generated_secret_round_trips() {
        let secret = generate_secret(&mut OsRng);
        let key = SigningKey::from_base64(&secret).expect("Failed to load generated key");

        assert_eq!(key.as_bytes().len(), SigningKey::GENERATED_LENGTH);
    }

    #[test]
    fn test_generated_secrets_differ() {
        assert_ne!(generate_secret(&mut OsRng), generate_secret(&mut OsRng));
    }

    #[test]
    fn test_blank_key_is_missing() {
        assert_eq!(SigningKey::from_base64("   ").unwrap_err(), KeyError::Missing);
        assert_eq!(SigningKey::new([]).unwrap_err(), KeyError::Missing);
    }

    #[test]
    fn test_short_key_rejected() {
        let result = SigningKey::new([7u8; 16]);
        assert_eq!(
            result.unwrap_err(),
            KeyError::TooShort {
                actual: 16,
                minimum: 32
            }
        );
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let result = SigningKey::from_base64("not base64 at all!");
        assert!(matches!(result, Err(KeyError::InvalidEncoding(_))));
    }

    #[test]
    fn test_debug_hides_key_bytes() {
        let key = SigningKey::new([0xABu8; 32]).unwrap();
        let rendered = format!("{:?}", key);

        assert!(rendered.contains("length: 32"));
        assert!(!rendered.contains("171"));
    }
}

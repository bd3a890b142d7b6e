use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::Sha512;

use super::claims::Claims;
use super::claims::Header;
use super::errors::TokenError;
use crate::key::SigningKey;

type HmacSha512 = Hmac<Sha512>;

/// A token split into its parts, readable but not yet trusted.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub header: Header,
    pub claims: Claims,
    signing_input: String,
    signature: Vec<u8>,
}

impl DecodedToken {
    /// The exact `header.claims` text the signature was computed over.
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

/// Encode claims into the compact `header.claims.signature` form.
///
/// # Errors
/// * `EncodingFailed` - Header or claims could not be serialized
pub fn encode(claims: &Claims, key: &SigningKey) -> Result<String, TokenError> {
    let header = encode_segment(&Header::hs512())?;
    let claims = encode_segment(claims)?;
    let signing_input = format!("{}.{}", header, claims);
    let signature = sign(signing_input.as_bytes(), key)?;

    Ok(format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Split and parse a token without checking its signature or expiry.
///
/// # Errors
/// * `MalformedToken` - Wrong segment count, bad base64, bad JSON, or missing claims
pub fn decode(token: &str) -> Result<DecodedToken, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header_segment, claims_segment, signature_segment] = segments[..] else {
        return Err(TokenError::MalformedToken(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let header: Header = decode_segment(header_segment, "header")?;
    let claims: Claims = decode_segment(claims_segment, "claims")?;
    let signature = URL_SAFE_NO_PAD
        .decode(signature_segment)
        .map_err(|e| TokenError::MalformedToken(format!("signature: {}", e)))?;

    Ok(DecodedToken {
        header,
        claims,
        signing_input: format!("{}.{}", header_segment, claims_segment),
        signature,
    })
}

/// Compute the HMAC-SHA-512 signature of `signing_input`.
///
/// # Errors
/// * `EncodingFailed` - The MAC could not be keyed
pub fn sign(signing_input: &[u8], key: &SigningKey) -> Result<Vec<u8>, TokenError> {
    let mut mac = HmacSha512::new_from_slice(key.as_bytes())
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    serde_json::to_vec(value)
        .map(|json| URL_SAFE_NO_PAD.encode(json))
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))
}

fn decode_segment<T: DeserializeOwned>(segment: &str, name: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::MalformedToken(format!("{}: {}", name, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedToken(format!("{}: {}", name, e)))
}

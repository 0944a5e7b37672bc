//! Stateless bearer-token codec.
//!
//! Tokens are HS256 JWTs carrying the user's identity claims. The signing
//! secret is process-wide configuration injected at construction; there is
//! no per-user keying and no global state. By default tokens carry no
//! expiry and stay valid until the secret rotates; setting a TTL in
//! configuration opts into an `exp` claim that is enforced on decode.

use std::time::Duration;

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pinpoint_core::UserId;

use crate::models::user::User;

/// Errors produced by the token codec.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Malformed token, bad signature, or unexpected algorithm.
    #[error("invalid token")]
    Invalid,

    /// The token carried an `exp` claim that has passed.
    #[error("token expired")]
    Expired,

    /// Signing failed while issuing a token.
    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Identity claims embedded in every issued token.
///
/// Derived from a persisted [`User`] at issuance time. Holders of a token
/// are re-resolved against the store on every authenticated request, so
/// stale `email`/`name`/`phone` values are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id; the only claim trusted after decode.
    pub id: UserId,
    /// Email at issuance time.
    pub email: String,
    /// Display name at issuance time.
    pub name: String,
    /// Phone at issuance time.
    pub phone: String,
    /// Expiry (Unix seconds). Absent unless a token TTL is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl From<&User> for Claims {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            exp: None,
        }
    }
}

/// Encoder/decoder for bearer tokens over a fixed symmetric secret.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret and optional TTL.
    #[must_use]
    pub fn new(secret: &SecretString, ttl: Option<Duration>) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional on the wire; when present it is still enforced.
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret_bytes),
            decoding: DecodingKey::from_secret(secret_bytes),
            validation,
            ttl,
        }
    }

    /// Sign the claims into a compact token.
    ///
    /// A configured TTL overrides any `exp` already present in `claims`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if serialization or signing fails.
    pub fn encode(&self, mut claims: Claims) -> Result<String, TokenError> {
        if let Some(ttl) = self.ttl {
            let expires_at = chrono::Utc::now() + ttl;
            claims.exp = u64::try_from(expires_at.timestamp()).ok();
        }

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Signing)
    }

    /// Verify the signature and return the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for a passed `exp` claim and
    /// [`TokenError::Invalid`] for everything else: malformed input, bad
    /// signature, or an algorithm other than HS256.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

//! Signed bearer token creation and verification.
//!
//! Tokens are compact JWTs (three dot-separated base64url segments) signed
//! with HMAC-SHA256 under a single process-wide key. Claims carry the subject
//! email, the roles granted at issue time, and issue/expiry timestamps.
//! Nothing is persisted: a token is valid iff its signature verifies under the
//! current key and its expiry lies in the future.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{api::models::users::Role, errors::Error as ServiceError};

/// Minimum signing secret length in bytes. HMAC-SHA256 keys shorter than the
/// hash output weaken the MAC, so startup fails below this.
pub const MIN_SECRET_KEY_BYTES: usize = 32;

/// Why a presented token was rejected.
///
/// Wrong signing key and corrupted signature bytes are indistinguishable by
/// construction; both surface as [`TokenError::BadSignature`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally invalid: wrong segment count, undecodable base64, bad JSON
    #[error("malformed token")]
    Malformed,
    /// Signature did not verify under the current key
    #[error("token signature verification failed")]
    BadSignature,
    /// Signature valid but the expiry timestamp is in the past
    #[error("token expired")]
    Expired,
}

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // Subject (user email)
    pub roles: Vec<Role>, // Roles granted at issue time
    pub iat: i64,         // Issued at
    pub exp: i64,         // Expiration time
}

/// Issues and verifies signed tokens.
///
/// Holds the derived signing keys and the configured time-to-live. Built once
/// at startup and shared read-only across all request tasks; the key is never
/// mutated after construction.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from the configured secret and token TTL.
    ///
    /// Fails fast if the secret is too short for HMAC-SHA256.
    pub fn new(secret: &str, ttl: std::time::Duration) -> Result<Self, ServiceError> {
        if secret.len() < MIN_SECRET_KEY_BYTES {
            return Err(ServiceError::Internal {
                operation: format!("construct token codec: signing secret must be at least {MIN_SECRET_KEY_BYTES} bytes for HMAC-SHA256"),
            });
        }

        let ttl = Duration::from_std(ttl).map_err(|e| ServiceError::Internal {
            operation: format!("construct token codec: token TTL out of range: {e}"),
        })?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    /// Issue a signed token for `subject` with `issuedAt = now` and
    /// `expiresAt = now + ttl`.
    ///
    /// HMAC signing is deterministic: identical inputs produce identical
    /// tokens.
    pub fn issue_at(&self, subject: &str, roles: &[Role], now: DateTime<Utc>) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| ServiceError::Internal {
            operation: format!("sign token: {e}"),
        })
    }

    /// Issue a token anchored at the current wall clock.
    pub fn issue(&self, subject: &str, roles: &[Role]) -> Result<String, ServiceError> {
        self.issue_at(subject, roles, Utc::now())
    }

    /// Decode and verify a token, returning its claims.
    ///
    /// Expiry is a strict comparison against this host's clock: no leeway,
    /// no skew compensation.
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            // Everything else is a token that never was valid: wrong segment
            // count, undecodable base64, claims that don't deserialize, an
            // unexpected algorithm, a missing exp claim.
            _ => TokenError::Malformed,
        })?;

        Ok(data.claims)
    }

    /// True iff the token verifies, is not expired, and was issued for
    /// `expected_subject`.
    ///
    /// The subject comparison guards against substitution: a valid token for a
    /// different account must not authenticate this one.
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        match self.parse(token) {
            Ok(claims) => claims.sub == expected_subject,
            Err(_) => false,
        }
    }
}

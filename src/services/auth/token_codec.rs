use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, sync::Arc};
use thiserror::Error;

use crate::services::auth::clock::Clock;

/// Admin sessions are re-established often.
pub const ADMIN_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;
/// User sessions persist for a year.
pub const USER_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

// Why a token was refused. Gates collapse all of these into one generic
// rejection; the variant is only ever logged.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("token signature invalid")]
    SignatureInvalid,
    #[error("token expired")]
    Expired,
    #[error("token not yet valid")]
    NotYetValid,
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => Self::SignatureInvalid,
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::ImmatureSignature => Self::NotYetValid,
            // Includes InvalidAlgorithm: a header naming anything outside the
            // HMAC family never reaches signature verification.
            _ => Self::Malformed,
        }
    }
}

/// Claims written at issuance.
#[derive(Debug, Serialize)]
struct IssuedClaims<'a> {
    user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_admin: Option<bool>,
    iat: i64,
    exp: i64,
}

/// Decoded claim set, exactly as it was signed.
///
/// Kept as a raw mapping so callers decide how strictly to read each key
/// (a non-string `user_id` is a gate-level rejection, not a decode failure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// `user_id`, when it is a string.
    pub fn subject(&self) -> Option<&str> {
        self.0.get("user_id").and_then(Value::as_str)
    }

    /// True only for an explicit boolean `true`.
    pub fn is_admin(&self) -> bool {
        matches!(self.0.get("is_admin"), Some(Value::Bool(true)))
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.0.get("iat").and_then(unix_seconds)
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.0.get("exp").and_then(unix_seconds)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

fn unix_seconds(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}

/// HS256 token codec over a single shared secret.
///
/// - Key material is intentionally not printable via Debug.
/// - Time checks use the injected clock with zero leeway; the window
///   `[iat, exp]` is closed on both ends.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithms", &self.validation.algorithms)
            .field("clock", &self.clock)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // exp/iat are checked against our own clock in `decode`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            clock,
        }
    }

    /// Sign `user_id` (+ `is_admin` for admin tokens) valid from now for `ttl_seconds`.
    pub fn encode(
        &self,
        subject: &str,
        is_admin: bool,
        ttl_seconds: u64,
    ) -> Result<String, TokenError> {
        let now = self.clock.now();
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);

        let claims = IssuedClaims {
            user_id: subject,
            is_admin: is_admin.then_some(true),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Verify structure, algorithm family, signature and validity window.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        if token.split('.').count() != 3 {
            return Err(TokenError::Malformed);
        }

        let claims =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        let (Some(iat), Some(exp)) = (claims.issued_at(), claims.expires_at()) else {
            return Err(TokenError::Malformed);
        };

        let now = self.clock.now();
        if now > exp {
            return Err(TokenError::Expired);
        }
        if now < iat {
            return Err(TokenError::NotYetValid);
        }

        Ok(claims)
    }
}

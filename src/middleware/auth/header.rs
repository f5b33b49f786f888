//! Credential header extraction shared by the admin and user gates.

use axum::http::{HeaderMap, HeaderName, header::AUTHORIZATION};

use super::error::{
    AUTHORIZATION_REQUIRED, AUTHORIZATION_TOO_LONG, AuthError, INVALID_AUTHORIZATION,
};
use crate::services::auth::token_codec::{Claims, TokenCodec};

pub const BEARER: &str = "Bearer";
pub const BASIC: &str = "Basic";

pub const TELEGRAM_ID: HeaderName = HeaderName::from_static("x-telegram-id");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    Missing,
    TooLong,
    /// Present but not visible ASCII.
    Invalid,
}

/// Read a single credential header.
///
/// The byte length is checked before the value is interpreted in any way.
/// An empty value counts as missing.
pub fn credential<'a>(
    headers: &'a HeaderMap,
    name: &HeaderName,
    max_bytes: usize,
) -> Result<&'a str, HeaderError> {
    let value = headers.get(name).ok_or(HeaderError::Missing)?;
    if value.len() > max_bytes {
        return Err(HeaderError::TooLong);
    }
    if value.is_empty() {
        return Err(HeaderError::Missing);
    }
    value.to_str().map_err(|_| HeaderError::Invalid)
}

/// Split `<scheme> <value>` on the first space and require an exact scheme match.
///
/// Returns `None` for any other scheme, a missing separator, or an empty value.
pub fn strip_scheme<'a>(header: &'a str, scheme: &str) -> Option<&'a str> {
    let (found, value) = header.split_once(' ')?;
    if found != scheme || value.is_empty() {
        return None;
    }
    Some(value)
}

/// The `Authorization` header, length-capped.
pub fn authorization(headers: &HeaderMap, max_bytes: usize) -> Result<&str, AuthError> {
    credential(headers, &AUTHORIZATION, max_bytes).map_err(|e| match e {
        HeaderError::Missing => AuthError::MissingCredential(AUTHORIZATION_REQUIRED),
        HeaderError::TooLong => AuthError::MalformedCredential(AUTHORIZATION_TOO_LONG),
        HeaderError::Invalid => AuthError::MalformedCredential(INVALID_AUTHORIZATION),
    })
}

/// Header -> `Bearer` value -> verified claims.
///
/// Every codec failure collapses into the same `InvalidToken`; the precise
/// reason only goes to the log.
pub fn bearer_claims(
    codec: &TokenCodec,
    headers: &HeaderMap,
    max_bytes: usize,
) -> Result<Claims, AuthError> {
    let auth = authorization(headers, max_bytes)?;
    let token = strip_scheme(auth, BEARER)
        .ok_or(AuthError::MalformedCredential(INVALID_AUTHORIZATION))?;

    codec.decode(token).map_err(|err| {
        tracing::warn!(error = %err, "access token verification failed");
        AuthError::invalid_token()
    })
}

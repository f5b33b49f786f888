//! Rejection taxonomy shared by both gates.
//!
//! Every variant is terminal and answers 401 with `{"error": "<reason>"}`.
//! The reason strings are fixed per rejection point; the variant names the
//! category for logs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::error::ErrorResponse;

pub const AUTHORIZATION_REQUIRED: &str = "header required";
pub const AUTHORIZATION_TOO_LONG: &str = "header too long";
pub const INVALID_AUTHORIZATION: &str = "invalid header";
pub const INVALID_OR_EXPIRED_TOKEN: &str = "invalid or expired token";
pub const INVALID_USER_ID_IN_TOKEN: &str = "invalid user id in token";
pub const ADMIN_ACCESS_REQUIRED: &str = "admin access required";
pub const INVALID_CREDENTIALS_FORMAT: &str = "invalid credentials format";
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
pub const TELEGRAM_ID_REQUIRED: &str = "telegram id header required";
pub const TELEGRAM_ID_TOO_LONG: &str = "telegram id header too long";
pub const INVALID_IDENTIFIER: &str = "invalid identifier";
pub const ADMIN_ON_USER_ROUTE: &str = "admin accounts cannot use user routes";
pub const USER_NOT_FOUND: &str = "user not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential header at all (or an empty one).
    #[error("{0}")]
    MissingCredential(&'static str),
    /// Wrong scheme, wrong shape, oversized, or an unusable subject.
    #[error("{0}")]
    MalformedCredential(&'static str),
    /// Signature / expiry / structure failure, or legacy credential mismatch.
    #[error("{0}")]
    InvalidToken(&'static str),
    /// Valid credential, wrong audience.
    #[error("{0}")]
    InsufficientPrivilege(&'static str),
    /// Valid credential, no matching account.
    #[error("{0}")]
    AccountNotFound(&'static str),
}

impl AuthError {
    pub fn invalid_token() -> Self {
        Self::InvalidToken(INVALID_OR_EXPIRED_TOKEN)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential(_) => "missing_credential",
            Self::MalformedCredential(_) => "malformed_credential",
            Self::InvalidToken(_) => "invalid_token",
            Self::InsufficientPrivilege(_) => "insufficient_privilege",
            Self::AccountNotFound(_) => "account_not_found",
        }
    }

    pub fn reason(&self) -> &'static str {
        match *self {
            Self::MissingCredential(r)
            | Self::MalformedCredential(r)
            | Self::InvalidToken(r)
            | Self::InsufficientPrivilege(r)
            | Self::AccountNotFound(r) => r,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(self.reason())),
        )
            .into_response()
    }
}

/*
 * Responsibility
 * - AppError shared by handlers (token issuance endpoints etc.)
 * - IntoResponse: HTTP status + `{"error": "<reason>"}`
 * - Convert lookup / codec errors without leaking internals
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::accounts::LookupError;
use crate::services::auth::token_codec::TokenError;

/// Wire shape of every error this service returns.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        tracing::error!(error = %e, "account lookup failed");
        AppError::Internal
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        tracing::error!(error = %e, "token issuance failed");
        AppError::Internal
    }
}

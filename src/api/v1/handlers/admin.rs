/*
 * Responsibility
 * - POST /admin/login: configured admin pair -> admin token (issued with the admin TTL)
 * - GET  /admin/me: the identity the admin gate attached
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::dto::auth::{AdminLoginRequest, TokenResponse},
    api::v1::extractors::{Identity, VerifiedIdentity},
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::InvalidRequest(msg.to_string()))?;

    // No pair configured means admin login is switched off.
    let credentials = state
        .admin_credentials
        .as_ref()
        .ok_or(AppError::Unauthorized("invalid credentials"))?;

    if !credentials.verify(&req.username, &req.password) {
        tracing::warn!("admin login refused");
        return Err(AppError::Unauthorized("invalid credentials"));
    }

    let token = state
        .codec
        .encode(credentials.username(), true, state.ttl.admin_seconds)?;
    tracing::info!(admin = %credentials.username(), "admin token issued");

    Ok(Json(TokenResponse::bearer(token, state.ttl.admin_seconds)))
}

pub async fn me(Identity(identity): Identity) -> Json<VerifiedIdentity> {
    Json(identity)
}

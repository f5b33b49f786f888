/*
 * Responsibility
 * - POST /users/login: Telegram id -> user token (issued with the user TTL)
 * - GET  /me: the identity the user gate attached
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::dto::auth::{TokenResponse, UserLoginRequest},
    api::v1::extractors::{Identity, VerifiedIdentity},
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<UserLoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::InvalidRequest(msg.to_string()))?;

    let account = state
        .accounts
        .find_by_telegram_id(req.telegram_id.trim())
        .await?
        .ok_or(AppError::Unauthorized("user not found"))?;

    if account.is_admin() {
        return Err(AppError::Unauthorized(
            "admin accounts cannot use user routes",
        ));
    }

    let token = state.codec.encode(&account.id, false, state.ttl.user_seconds)?;
    tracing::info!(user_id = %account.id, "user token issued");

    Ok(Json(TokenResponse::bearer(token, state.ttl.user_seconds)))
}

pub async fn me(Identity(identity): Identity) -> Json<VerifiedIdentity> {
    Json(identity)
}

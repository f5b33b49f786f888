//! User gate: proves the caller is a known, non-admin account.
//!
//! Telegram mode:
//! - `X-Telegram-ID` resolved through the account lookup
//!
//! Bearer mode:
//! - `Authorization: Bearer <jwt>` verified by the token codec
//! - `user_id` format-checked before the lookup, then resolved
//!
//! Admin accounts are refused in both modes. The identity is attached only
//! after the lookup has completed and every check passed.

use std::{fmt, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};

use super::error::{
    ADMIN_ON_USER_ROUTE, AuthError, INVALID_IDENTIFIER, INVALID_USER_ID_IN_TOKEN,
    TELEGRAM_ID_REQUIRED, TELEGRAM_ID_TOO_LONG, USER_NOT_FOUND,
};
use super::header::{HeaderError, TELEGRAM_ID, bearer_claims, credential};
use crate::api::v1::extractors::VerifiedIdentity;
use crate::services::accounts::{Account, AccountLookup, account_id_is_well_formed};
use crate::services::auth::TokenCodec;
use crate::state::AppState;

enum Mode {
    Telegram,
    Bearer(Arc<TokenCodec>),
}

pub struct UserGate {
    mode: Mode,
    accounts: Arc<dyn AccountLookup>,
    max_header_bytes: usize,
}

impl fmt::Debug for UserGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            Mode::Telegram => "telegram",
            Mode::Bearer(_) => "bearer",
        };
        f.debug_struct("UserGate")
            .field("mode", &mode)
            .field("max_header_bytes", &self.max_header_bytes)
            .finish_non_exhaustive()
    }
}

impl UserGate {
    pub fn telegram(accounts: Arc<dyn AccountLookup>, max_header_bytes: usize) -> Self {
        Self {
            mode: Mode::Telegram,
            accounts,
            max_header_bytes,
        }
    }

    pub fn bearer(
        codec: Arc<TokenCodec>,
        accounts: Arc<dyn AccountLookup>,
        max_header_bytes: usize,
    ) -> Self {
        Self {
            mode: Mode::Bearer(codec),
            accounts,
            max_header_bytes,
        }
    }

    pub async fn authorize(&self, headers: &HeaderMap) -> Result<VerifiedIdentity, AuthError> {
        let account = match &self.mode {
            Mode::Telegram => self.resolve_telegram_id(headers).await?,
            Mode::Bearer(codec) => self.resolve_token(codec, headers).await?,
        };

        if account.is_admin() {
            tracing::warn!(account_id = %account.id, "admin account refused on user route");
            return Err(AuthError::InsufficientPrivilege(ADMIN_ON_USER_ROUTE));
        }

        Ok(VerifiedIdentity::user(account.id))
    }

    async fn resolve_telegram_id(&self, headers: &HeaderMap) -> Result<Account, AuthError> {
        let telegram_id =
            credential(headers, &TELEGRAM_ID, self.max_header_bytes).map_err(|e| match e {
                HeaderError::Missing => AuthError::MissingCredential(TELEGRAM_ID_REQUIRED),
                HeaderError::TooLong => AuthError::MalformedCredential(TELEGRAM_ID_TOO_LONG),
                HeaderError::Invalid => AuthError::MalformedCredential(INVALID_IDENTIFIER),
            })?;

        match self.accounts.find_by_telegram_id(telegram_id).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => Err(AuthError::AccountNotFound(INVALID_IDENTIFIER)),
            Err(err) => {
                tracing::warn!(error = %err, "account lookup by telegram id failed");
                Err(AuthError::AccountNotFound(INVALID_IDENTIFIER))
            }
        }
    }

    async fn resolve_token(
        &self,
        codec: &TokenCodec,
        headers: &HeaderMap,
    ) -> Result<Account, AuthError> {
        let claims = bearer_claims(codec, headers, self.max_header_bytes)?;

        // Fail fast on junk before spending a lookup on it.
        let subject = claims
            .subject()
            .filter(|s| account_id_is_well_formed(s))
            .ok_or(AuthError::MalformedCredential(INVALID_USER_ID_IN_TOKEN))?;

        if claims.is_admin() {
            return Err(AuthError::InsufficientPrivilege(ADMIN_ON_USER_ROUTE));
        }

        match self.accounts.find_by_id(subject).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => Err(AuthError::AccountNotFound(USER_NOT_FOUND)),
            Err(err) => {
                tracing::warn!(error = %err, "account lookup by id failed");
                Err(AuthError::AccountNotFound(USER_NOT_FOUND))
            }
        }
    }
}

/// Put the user gate in front of every route of `router`.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, user_middleware))
}

async fn user_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = match state.user_gate.authorize(req.headers()).await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                kind = err.kind(),
                reason = err.reason(),
                path = %req.uri().path(),
                "user gate rejected request"
            );
            return Err(err);
        }
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

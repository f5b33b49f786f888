//! Admin gate: proves the caller holds administrative privilege.
//!
//! Bearer mode (default):
//! - `Authorization: Bearer <jwt>` verified by the token codec
//! - `is_admin == true` and a string `user_id` are required
//! - no account lookup: admin trust rests on the signed claim alone
//!
//! Basic mode (legacy):
//! - `Authorization: Basic <base64(user:pass)>` against the configured pair
//!
//! Each check is a hard stop; the first failure is the answer.

use std::{fmt, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::{self, Next},
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::error::{
    ADMIN_ACCESS_REQUIRED, AuthError, INVALID_AUTHORIZATION, INVALID_CREDENTIALS,
    INVALID_CREDENTIALS_FORMAT, INVALID_USER_ID_IN_TOKEN,
};
use super::header::{BASIC, authorization, bearer_claims, strip_scheme};
use crate::api::v1::extractors::VerifiedIdentity;
use crate::services::auth::{AdminCredentials, TokenCodec};
use crate::state::AppState;

enum Mode {
    Bearer(Arc<TokenCodec>),
    Basic(AdminCredentials),
}

pub struct AdminGate {
    mode: Mode,
    max_header_bytes: usize,
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            Mode::Bearer(_) => "bearer",
            Mode::Basic(_) => "basic",
        };
        f.debug_struct("AdminGate")
            .field("mode", &mode)
            .field("max_header_bytes", &self.max_header_bytes)
            .finish()
    }
}

impl AdminGate {
    pub fn bearer(codec: Arc<TokenCodec>, max_header_bytes: usize) -> Self {
        Self {
            mode: Mode::Bearer(codec),
            max_header_bytes,
        }
    }

    pub fn basic(credentials: AdminCredentials, max_header_bytes: usize) -> Self {
        Self {
            mode: Mode::Basic(credentials),
            max_header_bytes,
        }
    }

    /// Decide on a request from its headers alone. No I/O.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<VerifiedIdentity, AuthError> {
        match &self.mode {
            Mode::Bearer(codec) => {
                let claims = bearer_claims(codec, headers, self.max_header_bytes)?;

                if !claims.is_admin() {
                    return Err(AuthError::InsufficientPrivilege(ADMIN_ACCESS_REQUIRED));
                }

                let subject = claims
                    .subject()
                    .filter(|s| !s.trim().is_empty())
                    .ok_or(AuthError::MalformedCredential(INVALID_USER_ID_IN_TOKEN))?;

                Ok(VerifiedIdentity::admin(subject))
            }
            Mode::Basic(credentials) => {
                let auth = authorization(headers, self.max_header_bytes)?;
                verify_basic(credentials, auth)
            }
        }
    }
}

fn verify_basic(credentials: &AdminCredentials, auth: &str) -> Result<VerifiedIdentity, AuthError> {
    let encoded = strip_scheme(auth, BASIC)
        .ok_or(AuthError::MalformedCredential(INVALID_AUTHORIZATION))?;

    let decoded = STANDARD
        .decode(encoded)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or(AuthError::MalformedCredential(INVALID_CREDENTIALS_FORMAT))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredential(INVALID_CREDENTIALS_FORMAT))?;

    if !credentials.verify(username, password) {
        return Err(AuthError::InvalidToken(INVALID_CREDENTIALS));
    }

    Ok(VerifiedIdentity::admin(credentials.username()))
}

/// Put the admin gate in front of every route of `router`.
///
/// ```ignore
/// let admin = Router::new().route("/admin/me", get(admin::me));
/// let admin = middleware::auth::admin::apply(admin, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, admin_middleware))
}

async fn admin_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = match state.admin_gate.authorize(req.headers()) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                kind = err.kind(),
                reason = err.reason(),
                path = %req.uri().path(),
                "admin gate rejected request"
            );
            return Err(err);
        }
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

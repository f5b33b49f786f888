/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 *   - codec, both gates, account lookup, admin credential pair, token TTLs
 * - Clone is cheap (Arc inside); everything is read-only after startup
 */
use std::fmt;
use std::sync::Arc;

use crate::middleware::auth::{AdminGate, UserGate};
use crate::services::accounts::AccountLookup;
use crate::services::auth::{AdminCredentials, TokenCodec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTtl {
    pub admin_seconds: u64,
    pub user_seconds: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub codec: Arc<TokenCodec>,
    pub admin_gate: Arc<AdminGate>,
    pub user_gate: Arc<UserGate>,
    pub accounts: Arc<dyn AccountLookup>,
    pub admin_credentials: Option<AdminCredentials>,
    pub ttl: TokenTtl,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("codec", &self.codec)
            .field("admin_gate", &self.admin_gate)
            .field("user_gate", &self.user_gate)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

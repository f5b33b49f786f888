//! Request-authentication gate for an admin console and a Telegram-linked
//! end-user client.
//!
//! - [`services::auth::TokenCodec`] signs and verifies HS256 tokens.
//! - [`middleware::auth::AdminGate`] admits admin-token (or legacy basic) callers.
//! - [`middleware::auth::UserGate`] admits known, non-admin accounts by
//!   Telegram id or user token.
//!
//! A gate that admits a request leaves a
//! [`api::v1::extractors::VerifiedIdentity`] in its extensions; one that
//! refuses answers 401 `{"error": "<reason>"}` and the handler never runs.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;

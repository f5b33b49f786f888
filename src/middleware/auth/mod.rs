/*
 * Responsibility
 * - Admin gate / user gate (route_layer middleware)
 * - Shared credential header parsing
 * - Rejection taxonomy -> 401 `{"error": ...}`
 */
pub mod admin;
pub mod error;
pub mod header;
pub mod user;

pub use admin::AdminGate;
pub use error::AuthError;
pub use user::UserGate;

/*!
 * Verified identity extractor
 *
 * Public API:
 * - VerifiedIdentity
 * - Identity
 */

mod core;
mod types;

pub use self::core::Identity;
pub use self::types::VerifiedIdentity;

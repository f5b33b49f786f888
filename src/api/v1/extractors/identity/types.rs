/*
 * Responsibility
 * - The verified identity a gate attaches to a request
 * - Gates insert it into request extensions only after every check passed;
 *   handlers read it through the `Identity` extractor and nothing else
 */
use serde::Serialize;

/// Result of a successful gate pass. Lives exactly as long as the request.
///
/// - `subject` is the account id (`user_id` on the wire)
/// - `is_admin` is true only when the admin gate admitted the request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedIdentity {
    #[serde(rename = "user_id")]
    pub subject: String,
    pub is_admin: bool,
}

impl VerifiedIdentity {
    pub fn admin(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            is_admin: true,
        }
    }

    pub fn user(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            is_admin: false,
        }
    }
}

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Admin,
    User,
}

impl FromStr for AccountKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(LookupError::UnknownKind(other.to_string())),
        }
    }
}

/// Account record as the gates see it. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub kind: AccountKind,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.kind == AccountKind::Admin
    }
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("account store error: {0}")]
    Store(#[from] RepoError),
    #[error("unknown account kind: {0}")]
    UnknownKind(String),
}

/// Resolves identifiers to accounts.
///
/// Called concurrently from many in-flight requests; implementations own
/// whatever synchronization their backend needs.
///
/// Returns:
/// - Ok(Some(_)) => account exists
/// - Ok(None)    => no such account
/// - Err(_)      => backend failure (callers treat as an authentication failure)
#[async_trait]
pub trait AccountLookup: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, LookupError>;

    async fn find_by_telegram_id(
        &self,
        telegram_id: &str,
    ) -> Result<Option<Account>, LookupError>;
}

pub const MAX_ACCOUNT_ID_LEN: usize = 64;

/// Syntactic check run before any lookup: 1..=64 ASCII alphanumerics, `-` or `_`.
///
/// Covers UUIDs, 24-char hex object ids and short handles alike.
pub fn account_id_is_well_formed(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ACCOUNT_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_shapes() {
        assert!(account_id_is_well_formed("u1"));
        assert!(account_id_is_well_formed("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert!(account_id_is_well_formed(
            "0b1c2d3e-4f50-4617-8293-a4b5c6d7e8f9"
        ));

        assert!(!account_id_is_well_formed(""));
        assert!(!account_id_is_well_formed("u 1"));
        assert!(!account_id_is_well_formed("u1'; drop table accounts;--"));
        assert!(!account_id_is_well_formed(&"a".repeat(MAX_ACCOUNT_ID_LEN + 1)));
    }

    #[test]
    fn kind_parses_stored_values() {
        assert_eq!("admin".parse::<AccountKind>().unwrap(), AccountKind::Admin);
        assert_eq!("user".parse::<AccountKind>().unwrap(), AccountKind::User);
        assert!(matches!(
            "root".parse::<AccountKind>(),
            Err(LookupError::UnknownKind(_))
        ));
    }
}

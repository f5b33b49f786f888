use async_trait::async_trait;
use sqlx::PgPool;

use super::lookup::{Account, AccountLookup, LookupError};
use crate::repos::account_repo::{self, AccountRow};

/// `AccountLookup` backed by the `accounts` table. The pool handles concurrency.
#[derive(Debug, Clone)]
pub struct PgAccounts {
    db: PgPool,
}

impl PgAccounts {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn to_account(row: AccountRow) -> Result<Account, LookupError> {
    Ok(Account {
        kind: row.kind.parse()?,
        id: row.id,
    })
}

#[async_trait]
impl AccountLookup for PgAccounts {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, LookupError> {
        account_repo::get(&self.db, id)
            .await?
            .map(to_account)
            .transpose()
    }

    async fn find_by_telegram_id(
        &self,
        telegram_id: &str,
    ) -> Result<Option<Account>, LookupError> {
        account_repo::get_by_telegram_id(&self.db, telegram_id)
            .await?
            .map(to_account)
            .transpose()
    }
}

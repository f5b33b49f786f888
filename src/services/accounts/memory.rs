use std::collections::HashMap;

use async_trait::async_trait;

use super::lookup::{Account, AccountKind, AccountLookup, LookupError};

/// Fixed account table built up front and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    by_id: HashMap<String, Account>,
    by_telegram_id: HashMap<String, String>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(
        mut self,
        id: impl Into<String>,
        kind: AccountKind,
        telegram_id: Option<&str>,
    ) -> Self {
        let id = id.into();
        if let Some(tg) = telegram_id {
            self.by_telegram_id.insert(tg.to_string(), id.clone());
        }
        self.by_id.insert(id.clone(), Account { id, kind });
        self
    }

    pub fn with_user(self, id: impl Into<String>, telegram_id: Option<&str>) -> Self {
        self.with_account(id, AccountKind::User, telegram_id)
    }

    pub fn with_admin(self, id: impl Into<String>, telegram_id: Option<&str>) -> Self {
        self.with_account(id, AccountKind::Admin, telegram_id)
    }
}

#[async_trait]
impl AccountLookup for InMemoryAccounts {
    async fn find_by_id(&self, id: &str) -> Result<Option<Account>, LookupError> {
        Ok(self.by_id.get(id).cloned())
    }

    async fn find_by_telegram_id(
        &self,
        telegram_id: &str,
    ) -> Result<Option<Account>, LookupError> {
        Ok(self
            .by_telegram_id
            .get(telegram_id)
            .and_then(|id| self.by_id.get(id))
            .cloned())
    }
}

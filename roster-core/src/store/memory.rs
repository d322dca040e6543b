use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::account::{Account, AccountId, NewAccount};
use crate::error::{Result, RosterError};
use crate::store::AccountStore;

/// In-memory [`AccountStore`] mirroring the PostgreSQL contract, including
/// sequential id assignment and uniqueness errors on conflicting writes.
/// Intended for tests; the `BTreeMap` keeps `find_all` in id order.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: BTreeMap<AccountId, Account>,
    next_id: AccountId,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        Ok(self.inner.lock().await.accounts.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        Ok(self.inner.lock().await.accounts.values().cloned().collect())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.values().any(|a| a.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.values().any(|a| a.email == email))
    }

    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let mut inner = self.inner.lock().await;
        if inner.accounts.values().any(|a| a.username == account.username) {
            return Err(RosterError::UsernameTaken);
        }
        if inner.accounts.values().any(|a| a.email == account.email) {
            return Err(RosterError::EmailTaken);
        }

        inner.next_id += 1;
        let now = Utc::now();
        let created = Account {
            id: inner.next_id,
            username: account.username,
            email: account.email,
            credential: account.credential,
            created_at: now,
            updated_at: now,
        };
        inner.accounts.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner
            .accounts
            .values()
            .any(|a| a.id != account.id && a.username == account.username)
        {
            return Err(RosterError::UsernameTaken);
        }
        if inner
            .accounts
            .values()
            .any(|a| a.id != account.id && a.email == account.email)
        {
            return Err(RosterError::EmailTaken);
        }

        match inner.accounts.get_mut(&account.id) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => Err(RosterError::NotFound(account.id)),
        }
    }

    async fn delete_by_id(&self, id: AccountId) -> Result<u64> {
        let removed = self.inner.lock().await.accounts.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::account::{Account, AccountEdit, AccountId, NewAccount, Registration};
use crate::error::{Result, RosterError};
use crate::hasher::CredentialHasher;
use crate::store::AccountStore;

/// The one place account writes go through.
///
/// The service owns two rules and delegates everything else to the store:
/// plaintext credentials are hashed before they are persisted, and a
/// registration that fails a uniqueness pre-check never reaches the store.
/// The store's own constraints remain the final word on uniqueness, so a
/// racing insert still fails cleanly with the matching error.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService")
            .field("store", &Arc::strong_count(&self.store))
            .finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    pub async fn list_all(&self) -> Result<Vec<Account>> {
        self.store.find_all().await
    }

    pub async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        self.store.find_by_id(id).await
    }

    pub async fn username_taken(&self, username: &str) -> Result<bool> {
        self.store.username_exists(username).await
    }

    pub async fn email_taken(&self, email: &str) -> Result<bool> {
        self.store.email_exists(email).await
    }

    /// Hash the submitted credential and insert the account. The store
    /// assigns the id; a conflicting concurrent insert surfaces as
    /// [`RosterError::UsernameTaken`] or [`RosterError::EmailTaken`].
    pub async fn register(&self, submission: Registration) -> Result<Account> {
        let credential = self.hasher.hash(&submission.credential)?;
        let account = self
            .store
            .insert(NewAccount {
                username: submission.username,
                email: submission.email,
                credential,
            })
            .await?;

        info!("Registered account: {} ({})", account.username, account.id);
        Ok(account)
    }

    /// Merge the submitted fields onto the record stored at `id` and persist
    /// the result. The target must already exist; the submission cannot
    /// choose which record it lands on.
    pub async fn update(&self, id: AccountId, submission: AccountEdit) -> Result<Account> {
        let mut account = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(RosterError::NotFound(id))?;

        account.username = submission.username;
        account.email = submission.email;
        account.credential = self.hasher.hash(&submission.credential)?;
        account.updated_at = Utc::now();

        self.store.update(&account).await?;
        Ok(account)
    }

    /// Remove the account if it exists. Deleting an unknown id is a no-op.
    pub async fn delete_by_id(&self, id: AccountId) -> Result<()> {
        let removed = self.store.delete_by_id(id).await?;
        if removed == 0 {
            debug!("Delete matched no account: {}", id);
        }
        Ok(())
    }
}

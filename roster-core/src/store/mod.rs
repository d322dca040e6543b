use async_trait::async_trait;

use crate::account::{Account, AccountId, NewAccount};
use crate::error::Result;

mod postgres;
pub use postgres::PostgresAccountStore;

#[cfg(any(test, feature = "test-utils"))]
mod memory;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryAccountStore;

/// Persistence port for [`Account`] records.
///
/// Uniqueness of usernames and emails is enforced by implementations at the
/// moment of write. Callers may pre-check with the `*_exists` methods for
/// friendlier flows, but a conflicting write must still fail with the
/// matching uniqueness error rather than corrupt the store.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up one account. Absence is not an error.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>>;

    /// All accounts in ascending id order.
    async fn find_all(&self) -> Result<Vec<Account>>;

    async fn username_exists(&self, username: &str) -> Result<bool>;

    async fn email_exists(&self, email: &str) -> Result<bool>;

    /// Persist a new account and return it with its assigned id.
    async fn insert(&self, account: NewAccount) -> Result<Account>;

    /// Replace the stored record with the same id as `account`.
    async fn update(&self, account: &Account) -> Result<()>;

    /// Remove the account if present. Returns the number of records removed;
    /// deleting an absent id is not an error.
    async fn delete_by_id(&self, id: AccountId) -> Result<u64>;
}

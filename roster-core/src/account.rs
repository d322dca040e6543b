use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Store-assigned account identifier.
pub type AccountId = i64;

/// A persisted account record.
///
/// The `credential` field always holds the hashed form of the account's
/// secret. Plaintext credentials exist only transiently in [`Registration`]
/// and [`AccountEdit`] submissions, and are hashed before they reach a store.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub credential: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for [`crate::store::AccountStore::insert`]. The credential must
/// already be hashed; the store assigns the id and timestamps.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub credential: String,
}

/// A registration form submission, credential still in plaintext.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub credential: String,
}

/// An edit form submission, applied to the account selected by the request
/// path. Any identifier present in the payload is discarded during
/// deserialization; only the path decides which record changes.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountEdit {
    pub username: String,
    pub email: String,
    pub credential: String,
}

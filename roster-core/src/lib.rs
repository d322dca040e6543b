//! Core library for Roster.
//!
//! Everything the server needs to manage accounts lives here: the
//! [`Account`] model, the [`AccountStore`] persistence port with its
//! PostgreSQL implementation, credential hashing, and the
//! [`AccountService`] that ties them together. HTTP concerns stay out of
//! this crate.

pub mod account;
pub mod error;
pub mod hasher;
pub mod service;
pub mod store;

/// Migrations embedded from `migrations/` at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

pub use account::{Account, AccountEdit, AccountId, NewAccount, Registration};
pub use error::{Result, RosterError};
pub use hasher::{Argon2CredentialHasher, CredentialHasher};
pub use service::AccountService;
#[cfg(any(test, feature = "test-utils"))]
pub use store::MemoryAccountStore;
pub use store::{AccountStore, PostgresAccountStore};

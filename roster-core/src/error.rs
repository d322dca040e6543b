use thiserror::Error;

use crate::account::AccountId;

/// Errors surfaced by the account service and its stores.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("no account with id {0}")]
    NotFound(AccountId),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("credential hashing failed: {0}")]
    Hashing(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RosterError>;

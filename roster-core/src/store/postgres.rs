use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::MIGRATOR;
use crate::account::{Account, AccountId, NewAccount};
use crate::error::{Result, RosterError};
use crate::store::AccountStore;

// Constraint names from migrations/0001_create_accounts.sql.
const USERNAME_CONSTRAINT: &str = "accounts_username_key";
const EMAIL_CONSTRAINT: &str = "accounts_email_key";

/// PostgreSQL-backed implementation of the [`AccountStore`] port.
#[derive(Clone, Debug)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`. Pool size comes from
    /// `DB_MAX_CONNECTIONS` when set.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to connect to database: {}", e)))?;

        info!(
            "Connected to PostgreSQL with max_connections={}",
            max_connections
        );
        Ok(Self::new(pool))
    }

    /// Apply the migrations embedded in this crate.
    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to run migrations: {}", e)))?;
        Ok(())
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a unique-constraint violation onto the matching uniqueness error.
/// Anything else becomes `Internal` tagged with `context`.
fn translate_unique_violation(e: sqlx::Error, context: &str) -> RosterError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.constraint() == Some(USERNAME_CONSTRAINT) {
            return RosterError::UsernameTaken;
        }
        if db_err.constraint() == Some(EMAIL_CONSTRAINT) {
            return RosterError::EmailTaken;
        }
    }
    RosterError::Internal(format!("{}: {}", context, e))
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, email, credential, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| RosterError::Internal(format!("Failed to get account by id: {}", e)))?;

        Ok(account)
    }

    async fn find_all(&self) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, username, email, credential, created_at, updated_at
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| RosterError::Internal(format!("Failed to get all accounts: {}", e)))?;

        Ok(accounts)
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(self.pool())
        .await
        .map_err(|e| RosterError::Internal(format!("Failed to check username: {}", e)))?;

        Ok(exists)
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(self.pool())
        .await
        .map_err(|e| RosterError::Internal(format!("Failed to check email: {}", e)))?;

        Ok(exists)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, email, credential)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, credential, created_at, updated_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.credential)
        .fetch_one(self.pool())
        .await
        .map_err(|e| translate_unique_violation(e, "Failed to insert account"))?;

        info!("Created account: {} ({})", created.username, created.id);
        Ok(created)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET username = $2, email = $3, credential = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.credential)
        .bind(account.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| translate_unique_violation(e, "Failed to update account"))?;

        if result.rows_affected() == 0 {
            return Err(RosterError::NotFound(account.id));
        }

        info!("Updated account: {} ({})", account.username, account.id);
        Ok(())
    }

    async fn delete_by_id(&self, id: AccountId) -> Result<u64> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to delete account: {}", e)))?;

        let removed = result.rows_affected();
        if removed > 0 {
            info!("Deleted account: {}", id);
        }
        Ok(removed)
    }
}

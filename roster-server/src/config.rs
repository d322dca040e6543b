use std::env;

use anyhow::Context;
use serde::Deserialize;

/// Server configuration sourced from environment variables. A `.env` file in
/// the working directory is honored when present.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: Option<String>,
    /// Name of the cookie carrying the session id.
    pub session_cookie: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").ok(),
            session_cookie: env::var("SESSION_COOKIE")
                .unwrap_or_else(|_| "roster_session".to_string()),
        })
    }

    /// The database URL is optional at load time so that offline commands can
    /// still run, but serving and migrating require it.
    pub fn require_database_url(&self) -> anyhow::Result<&str> {
        self.database_url
            .as_deref()
            .context("DATABASE_URL must be set (environment or .env file)")
    }
}

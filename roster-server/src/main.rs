//! # Roster Server
//!
//! Minimal user management over server-rendered pages:
//!
//! - **Registration**: duplicate-aware form with per-field errors
//! - **Accounts**: list, edit, and delete stored accounts
//! - **Sessions**: logout revokes the session named by the request cookie
//!
//! Accounts persist in PostgreSQL; credentials are hashed with Argon2 before
//! they ever reach the database.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_core::{AccountService, Argon2CredentialHasher, PostgresAccountStore};
use roster_server::{
    app,
    config::Config,
    session::InMemorySessionStore,
    state::AppState,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "roster-server")]
#[command(about = "User management pages over a PostgreSQL account store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,

    /// PostgreSQL connection string (overrides config)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_runtime_config(&cli.serve)?;

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        return run_db_migrate(&config).await;
    }

    run_server(config).await
}

fn load_runtime_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut config = Config::from_env().context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server_host = host;
    }
    if let Some(database_url) = args.database_url.clone() {
        config.database_url = Some(database_url);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(config)
}

async fn run_db_migrate(config: &Config) -> anyhow::Result<()> {
    let store = PostgresAccountStore::connect(config.require_database_url()?)
        .await
        .context("failed to connect to PostgreSQL for migration")?;
    store
        .run_migrations()
        .await
        .context("database migration failed")?;
    info!("Database migrations applied successfully");
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    let store = PostgresAccountStore::connect(config.require_database_url()?)
        .await
        .context("failed to connect to PostgreSQL")?;
    store
        .run_migrations()
        .await
        .context("database migration failed")?;

    let accounts = AccountService::new(
        Arc::new(store),
        Arc::new(Argon2CredentialHasher::new()),
    );

    let state = AppState {
        accounts: Arc::new(accounts),
        sessions: Arc::new(InMemorySessionStore::new()),
        config: Arc::new(config.clone()),
    };

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .context("invalid server address")?;

    info!("Starting Roster on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}

//! Server-rendered user management pages over a PostgreSQL account store.
//!
//! The binary in `main.rs` wires configuration, the database-backed store,
//! and the session store together; everything above that wiring lives here
//! so integration tests can assemble the same application with test doubles.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;

use state::AppState;

/// Assemble the full application router on top of `state`.
pub fn app(state: AppState) -> Router {
    routes::pages()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

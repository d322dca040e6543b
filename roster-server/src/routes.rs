use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Page routes plus the health endpoint. Anything else gets the framework's
/// default 404.
pub fn pages() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/login", get(handlers::login))
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register),
        )
        .route("/users", get(handlers::list_users))
        .route("/users/edit/{id}", get(handlers::edit_form))
        .route("/users/update/{id}", post(handlers::update_user))
        .route("/users/delete/{id}", get(handlers::delete_user))
        .route("/logout", get(handlers::logout))
        .route("/health", get(handlers::health))
}

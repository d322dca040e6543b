use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use roster_core::{AccountEdit, AccountId, Registration};

use crate::{
    errors::{AppError, AppResult},
    session,
    state::AppState,
    views::{self, EditView, HomeView, LoginView, RegisterView, UsersView},
};

/// Landing page
pub async fn home() -> AppResult<Html<String>> {
    views::render(HomeView)
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Present (with any value) right after a successful registration.
    registered: Option<String>,
}

/// Login page, with a success banner when arriving from registration
pub async fn login(Query(query): Query<LoginQuery>) -> AppResult<Html<String>> {
    views::render(LoginView {
        registered: query.registered.is_some(),
    })
}

/// Blank registration form
pub async fn register_form() -> AppResult<Html<String>> {
    views::render(RegisterView::empty())
}

/// Handle a registration submission.
///
/// Two uniqueness gates run in order; the first one that fails re-renders
/// the form with that error and the submitted values, without touching the
/// store. Only a submission that passes both reaches the service.
pub async fn register(
    State(state): State<AppState>,
    Form(submission): Form<Registration>,
) -> AppResult<Response> {
    if state.accounts.username_taken(&submission.username).await? {
        let page = views::render(RegisterView::username_taken(submission))?;
        return Ok(page.into_response());
    }

    if state.accounts.email_taken(&submission.email).await? {
        let page = views::render(RegisterView::email_taken(submission))?;
        return Ok(page.into_response());
    }

    state.accounts.register(submission).await?;
    Ok(Redirect::to("/login?registered").into_response())
}

/// Table of all accounts
pub async fn list_users(State(state): State<AppState>) -> AppResult<Html<String>> {
    let accounts = state.accounts.list_all().await?;
    views::render(UsersView { accounts })
}

/// Edit form for one account
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> AppResult<Html<String>> {
    let account = state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::bad_request(format!("Invalid account id: {}", id)))?;

    views::render(EditView { account })
}

/// Apply an edit submission to the account named by the path.
///
/// The path id alone selects the record; deserialization of
/// [`AccountEdit`] drops any id smuggled into the payload.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    Form(submission): Form<AccountEdit>,
) -> AppResult<Redirect> {
    state.accounts.update(id, submission).await?;
    Ok(Redirect::to("/users"))
}

/// Delete an account. Unknown ids fall through to the same redirect.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> AppResult<Redirect> {
    state.accounts.delete_by_id(id).await?;
    Ok(Redirect::to("/users"))
}

/// Invalidate the session named by the cookie, if any, then head home.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_name = state.config.session_cookie.as_str();
    if let Some(session_id) = session::session_id_from_headers(&headers, cookie_name) {
        if state.sessions.invalidate(session_id).await {
            info!("Logged out session: {}", session_id);
        }
    }

    let clear_cookie = session::expired_session_cookie(cookie_name);
    ([(header::SET_COOKIE, clear_cookie)], Redirect::to("/")).into_response()
}

/// Health check endpoint with a database probe
pub async fn health(State(state): State<AppState>) -> Response {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let version = env!("CARGO_PKG_VERSION");

    match state.accounts.list_all().await {
        Ok(accounts) => Json(json!({
            "status": "healthy",
            "timestamp": timestamp,
            "version": version,
            "checks": {
                "database": {
                    "status": "healthy",
                    "accounts": accounts.len(),
                }
            }
        }))
        .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "timestamp": timestamp,
                "version": version,
                "checks": {
                    "database": {
                        "status": "unhealthy",
                        "error": e.to_string(),
                    }
                }
            })),
        )
            .into_response(),
    }
}

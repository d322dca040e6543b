use askama::Template;
use axum::response::Html;

use roster_core::{Account, Registration};

use crate::errors::{AppError, AppResult};

const USERNAME_TAKEN: &str = "Username already exists";
const EMAIL_TAKEN: &str = "Email already exists";

#[derive(Debug, Template)]
#[template(path = "home.html")]
pub struct HomeView;

#[derive(Debug, Template)]
#[template(path = "login.html")]
pub struct LoginView {
    /// Show the "registration succeeded" banner.
    pub registered: bool,
}

/// The registration form, either pristine or re-rendered with the submitted
/// values and the first uniqueness error that applies.
#[derive(Debug, Template)]
#[template(path = "register.html")]
pub struct RegisterView {
    pub form: Registration,
    pub username_error: Option<&'static str>,
    pub email_error: Option<&'static str>,
}

impl RegisterView {
    pub fn empty() -> Self {
        Self {
            form: Registration::default(),
            username_error: None,
            email_error: None,
        }
    }

    pub fn username_taken(form: Registration) -> Self {
        Self {
            form,
            username_error: Some(USERNAME_TAKEN),
            email_error: None,
        }
    }

    pub fn email_taken(form: Registration) -> Self {
        Self {
            form,
            username_error: None,
            email_error: Some(EMAIL_TAKEN),
        }
    }
}

#[derive(Debug, Template)]
#[template(path = "users.html")]
pub struct UsersView {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Template)]
#[template(path = "edit-user.html")]
pub struct EditView {
    pub account: Account,
}

#[derive(Debug, Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub status: u16,
    pub message: String,
}

/// Render a view to an HTML response.
pub fn render<T: Template>(view: T) -> AppResult<Html<String>> {
    let body = view
        .render()
        .map_err(|e| AppError::internal(format!("Failed to render page: {}", e)))?;
    Ok(Html(body))
}

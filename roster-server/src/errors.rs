use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use roster_core::RosterError;

use crate::views::ErrorView;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let view = ErrorView {
            status: self.status.as_u16(),
            message: self.message,
        };

        // Rendering the error page has no further error channel, so fall
        // back to plain text if the template itself fails.
        match view.render() {
            Ok(body) => (self.status, Html(body)).into_response(),
            Err(_) => (self.status, view.message).into_response(),
        }
    }
}

// Convert from domain and infrastructure error types
impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        match &err {
            // A request naming an id that does not exist is the caller's
            // mistake, not a missing page.
            RosterError::NotFound(_) => Self::bad_request(err.to_string()),
            RosterError::UsernameTaken | RosterError::EmailTaken => Self::conflict(err.to_string()),
            RosterError::Hashing(_) | RosterError::Internal(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

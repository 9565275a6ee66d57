use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::constants::{MSG_AUTH_FAILED, MSG_GENERATION_FAILED, MSG_INTERNAL};
use crate::views;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    /// A remote service answered with a non-success status
    #[error("{service} returned {status}: {message}")]
    Provider {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User creation failed: {0}")]
    UserCreation(String),

    #[error("Image generation failed with status {0}")]
    GenerationFailed(u16),

    #[error("Inference endpoint did not return an image")]
    NotAnImage,

    #[error("Inference request failed: {0}")]
    Inference(reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not logged in")]
    Unauthorized,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Http(_) | AppError::Provider { .. } => StatusCode::BAD_GATEWAY,
            AppError::GenerationFailed(_) | AppError::NotAnImage | AppError::Inference(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::AuthenticationFailed | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::UserCreation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_)
            | AppError::Token(_)
            | AppError::Session(_)
            | AppError::Credentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the user; never includes internal details
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthenticationFailed | AppError::Unauthorized => MSG_AUTH_FAILED.to_string(),
            AppError::UserCreation(reason) => format!("Error creating user: {reason}"),
            e if e.is_generation_failure() => MSG_GENERATION_FAILED.to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            _ => MSG_INTERNAL.to_string(),
        }
    }

    /// True when the inference step failed, whatever the cause
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            AppError::GenerationFailed(_) | AppError::NotAnImage | AppError::Inference(_)
        )
    }

    /// Log at `warn` for user-caused failures and `error` for everything else
    pub fn log(&self) {
        match self.status_code() {
            s if s.is_client_error() => tracing::warn!("{}", self),
            _ => tracing::error!("{:?}", self),
        }
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unauthorized = self {
            return Redirect::to("/login").into_response();
        }

        self.log();
        (self.status_code(), views::error_page(&self.user_message())).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;

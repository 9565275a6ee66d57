//! Logo Studio Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

pub use config::Config;
pub use error::{AppError, Result};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use services::{AuthProvider, LogoStudio};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth: Arc<dyn AuthProvider>,
    pub studio: Arc<LogoStudio>,
}

impl AppState {
    /// Create a new AppState with the given configuration and services
    pub fn new(config: Config, auth: Arc<dyn AuthProvider>, studio: LogoStudio) -> Self {
        Self {
            config,
            auth,
            studio: Arc::new(studio),
        }
    }
}

/// Build the application router with sessions and request tracing
pub fn build_router(state: AppState) -> Router {
    let sessions =
        SessionManagerLayer::new(MemoryStore::default()).with_secure(state.config.secure_cookies());

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health_check))
        .route("/login", get(routes::login_form).post(routes::login))
        .route("/signup", get(routes::signup_form).post(routes::signup))
        .route("/logout", post(routes::logout))
        .route("/logos", get(routes::list_logos))
        .route(
            "/generate",
            get(routes::generate_form).post(routes::generate_logo),
        )
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! enricher library interface
//!
//! Exposes the application state, router construction, and the layered
//! modules for integration testing.

pub mod api;
pub mod config;
pub mod db;
pub mod enrich;
pub mod error;
pub mod models;
pub mod service;
pub mod validate;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::enrich::Enricher;
use crate::service::UserService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Service facade over the user store
    pub service: Arc<UserService>,
    /// Enrichment orchestrator over the inference clients
    pub enricher: Arc<Enricher>,
}

impl AppState {
    /// Create new application state
    pub fn new(service: UserService, enricher: Enricher) -> Self {
        Self {
            service: Arc::new(service),
            enricher: Arc::new(enricher),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::users::list_users))
        .route("/add", post(api::users::add_user))
        .route("/edit", post(api::users::edit_user))
        .route("/delete", post(api::users::delete_user))
        .merge(api::health_routes())
        .with_state(state)
}

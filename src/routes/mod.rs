//! HTTP routes module

mod health;
pub mod station;

use crate::config::ManagerConfig;
use crate::docker::DockerManager;
use crate::error::ManagerError;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: ManagerConfig,
    pub docker: Arc<DockerManager>,
    pub db: SqlitePool,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/create-base-station", post(station::create_base_station))
        .route("/ping", get(health::ping_handler))
        .fallback(fallback_handler)
        .with_state(state)
}

/// Fallback handler for unmatched routes
async fn fallback_handler() -> ManagerError {
    ManagerError::RouteNotFound
}

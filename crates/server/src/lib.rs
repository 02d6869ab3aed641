//! Development backend for the marker board.
//!
//! Serves board JSON, place details and the pin-selection submission with the
//! same paths and CSRF cookie/header contract as the production site.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub mod csrf;
pub mod routes;
pub mod store;

pub use store::Store;

/// Default listen address when `GMARKER_BIND` is not set
pub const DEFAULT_BIND: &str = "127.0.0.1:3001";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/search/{code}", get(routes::board).post(routes::submit))
        .route(
            "/search/detail/{place_id}",
            get(routes::detail).post(routes::detail_checked),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

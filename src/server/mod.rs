//! HTTP server for the public menu page and the storage proxy.
//!
//! - `GET /health`: health check
//! - `GET /`: public menu page (`?lang=xx` switches and remembers the language)
//! - `GET /menu.json`: raw menu document, never cached
//! - `GET /api/menu`, `POST /api/menu`: storage proxy (`X-Admin-Password` required)

mod routes;
pub mod storage;

use axum::{middleware, routing::get, Router};
use menuboard_core::Settings;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use storage::{MenuStorage, StorageError};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<MenuStorage>,
    pub settings: Arc<Settings>,
    /// Password for the storage proxy; without one the proxy rejects everything
    pub admin_password: Option<String>,
}

pub fn router(state: AppState) -> Router {
    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/", get(routes::menu_page))
        .route("/menu.json", get(routes::menu_json));

    // Storage proxy (admin password required)
    let protected_routes = Router::new()
        .route("/api/menu", get(routes::read_menu).post(routes::write_menu))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

//! Safari package pricing engine.
//!
//! Library half of the service: the pure pricing calculators live in
//! [`pricing`], the HTTP surface is assembled by [`app`].

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::AppCache;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .merge(pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

//! Series Catalog Backend
//!
//! A REST backend for television series and their directors, with SQLite persistence.

mod api;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Series Catalog Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Seed sample data on an empty store
    if repo.seed_if_empty().await? {
        tracing::info!("Database was empty, sample data inserted");
    }

    // Create application state
    let state = AppState { repo };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Directors
        .route("/directors", get(api::list_directors))
        .route("/directors", post(api::create_director))
        .route("/directors/{id}", get(api::get_director))
        .route("/directors/{id}", put(api::update_director))
        .route("/directors/{id}", delete(api::delete_director))
        // Series
        .route("/series", get(api::list_series))
        .route("/series", post(api::create_series))
        .route("/series/{id}", get(api::get_series))
        .route("/series/{id}", put(api::update_series))
        .route("/series/{id}", delete(api::delete_series))
        // Root greeting and health check
        .route("/", get(root))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint with a static greeting.
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Television series catalog API" }))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;

use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::request_id_middleware,
    services::{providers::RatingSource, DiscoverService},
};

pub mod discover;
pub mod ratings;

/// Shared application state
pub struct AppState {
    pub discover: Arc<DiscoverService>,
    pub ratings: Arc<dyn RatingSource>,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/discover", get(discover::discover))
        .route(
            "/titles/:media_type/:tmdb_id/rating",
            get(ratings::rating),
        )
        .route("/ratings", get(ratings::rating_batch))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{providers::CatalogProvider, recommendations::RankingOptions},
};

pub mod playlists;
pub mod recommendations;
pub mod users;

/// Shared, read-only application state
///
/// Holds only the provider client and ranking defaults; catalogs are built
/// per request and never stored here.
pub struct AppState {
    pub provider: Arc<dyn CatalogProvider>,
    pub ranking: RankingOptions,
}

impl AppState {
    pub fn new(provider: Arc<dyn CatalogProvider>, ranking: RankingOptions) -> Self {
        Self { provider, ranking }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(Arc::new(state))
        // Request id is assigned before the trace span is created
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/playlists", get(users::get_playlists))
        .route("/playlists/:playlist_id/catalog", get(playlists::get_catalog))
        .route(
            "/playlists/:playlist_id/tracks/:track_id/recommendations",
            get(playlists::recommend_for_track),
        )
        .route("/recommendations", post(recommendations::recommend))
        .route("/recency-weight", get(recommendations::recency_weight))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::Catalog,
    routes::AppState,
    services::playlists::{self, TrackRecommendations},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    count: Option<usize>,
}

/// Handler returning a playlist's catalog snapshot
pub async fn get_catalog(
    State(state): State<Arc<AppState>>,
    Path(playlist_id): Path<String>,
) -> AppResult<Json<Catalog>> {
    let catalog = playlists::build_catalog(state.provider.as_ref(), &playlist_id).await?;
    Ok(Json(catalog))
}

/// Handler for recommendations seeded by a playlist track
pub async fn recommend_for_track(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((playlist_id, track_id)): Path<(String, String)>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<TrackRecommendations>> {
    let mut options = state.ranking;
    if let Some(count) = params.count {
        options.count = count;
    }

    tracing::info!(
        request_id = %request_id,
        playlist_id = %playlist_id,
        track_id = %track_id,
        count = options.count,
        "Processing track recommendation request"
    );

    let result = playlists::recommend_for_track(
        state.provider.as_ref(),
        &playlist_id,
        &track_id,
        options,
    )
    .await?;

    Ok(Json(result))
}

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{PlaylistSummary, UserProfile},
    routes::AppState,
};

/// Handler for user profile lookup
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    tracing::info!(request_id = %request_id, user_id = %user_id, "Fetching user profile");

    let profile = state.provider.get_user(&user_id).await?;
    Ok(Json(profile))
}

/// Handler for a user's public playlists
pub async fn get_playlists(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<PlaylistSummary>>> {
    let playlists = state.provider.get_user_playlists(&user_id).await?;
    Ok(Json(playlists))
}

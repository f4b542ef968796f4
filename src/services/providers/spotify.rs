/// Spotify Web API provider
///
/// Reads public users, playlists, tracks and audio features with a bearer
/// token supplied by configuration.
///
/// API Flow:
/// 1. Profile: /users/{id} and /users/{id}/playlists
/// 2. Playlist contents: /playlists/{id}/tracks
/// 3. Enrichment: /audio-features?ids=... and /tracks?ids=...
use crate::{
    error::{AppError, AppResult},
    models::{
        ApiAudioFeatures, ApiAudioFeaturesResponse, ApiPlaylistPage, ApiPlaylistTracksPage,
        ApiTrack, ApiTracksResponse, ApiUser, PlaylistSummary, UserProfile,
    },
    services::providers::CatalogProvider,
};
use reqwest::{Client as HttpClient, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

const PROVIDER_NAME: &str = "spotify";

#[derive(Clone)]
pub struct SpotifyProvider {
    http_client: HttpClient,
    access_token: String,
    api_url: String,
}

impl SpotifyProvider {
    pub fn new(access_token: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            access_token,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Appends `segments` to the API base, percent-encoding each one
    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Internal(format!("Invalid Spotify API URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Internal("Spotify API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Sends an authorized GET and returns the raw response
    async fn send(&self, segments: &[&str], query: &[(&str, String)]) -> AppResult<Response> {
        let url = self.url(segments)?;
        tracing::debug!(url = %url, provider = PROVIDER_NAME, "Calling Spotify API");

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        Ok(response)
    }

    /// Decodes a successful response, mapping any other status to an error
    async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Spotify API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize Spotify response"
            );
            AppError::ExternalApi(format!("Failed to parse Spotify response: {}", e))
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let response = self.send(segments, query).await?;
        Self::decode(response).await
    }
}

/// Rejects ids that would not name a single path segment
fn validate_id<'a>(kind: &str, id: &'a str) -> AppResult<&'a str> {
    let id = id.trim();
    if id.is_empty() || id == "." || id == ".." {
        return Err(AppError::InvalidInput(format!("Invalid {} ID: {:?}", kind, id)));
    }
    Ok(id)
}

/// Error for a user lookup answered with `status`
///
/// Only 400 and 404 mean the user does not exist; other failures are left
/// to [`SpotifyProvider::decode`].
fn user_lookup_error(status: StatusCode, user_id: &str) -> Option<AppError> {
    match status {
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => {
            Some(AppError::NotFound(format!("Invalid user ID: {}", user_id)))
        }
        _ => None,
    }
}

/// Comma-joined id list for the multi-id endpoints
fn ids_param(track_ids: &[String]) -> (&'static str, String) {
    ("ids", track_ids.join(","))
}

/// Keeps only playlist entries that resolve to a track with an id
fn playable_tracks(page: ApiPlaylistTracksPage) -> Vec<ApiTrack> {
    page.items
        .into_iter()
        .filter_map(|item| item.track)
        .filter(|track| track.id.is_some())
        .collect()
}

#[async_trait::async_trait]
impl CatalogProvider for SpotifyProvider {
    async fn get_user(&self, user_id: &str) -> AppResult<UserProfile> {
        let user_id = validate_id("user", user_id)?;
        let response = self.send(&["users", user_id], &[]).await?;

        if let Some(error) = user_lookup_error(response.status(), user_id) {
            return Err(error);
        }

        let user: ApiUser = Self::decode(response).await?;
        Ok(UserProfile::from(user))
    }

    async fn get_user_playlists(&self, user_id: &str) -> AppResult<Vec<PlaylistSummary>> {
        let user_id = validate_id("user", user_id)?;
        let page: ApiPlaylistPage = self
            .get_json(&["users", user_id, "playlists"], &[])
            .await?;

        let playlists: Vec<PlaylistSummary> =
            page.items.into_iter().map(PlaylistSummary::from).collect();

        tracing::info!(
            user_id = %user_id,
            playlists = playlists.len(),
            provider = PROVIDER_NAME,
            "Playlists fetched"
        );

        Ok(playlists)
    }

    async fn get_playlist_tracks(&self, playlist_id: &str) -> AppResult<Vec<ApiTrack>> {
        let playlist_id = validate_id("playlist", playlist_id)?;
        let page: ApiPlaylistTracksPage = self
            .get_json(&["playlists", playlist_id, "tracks"], &[])
            .await?;

        let total_items = page.items.len();
        let tracks = playable_tracks(page);

        tracing::info!(
            playlist_id = %playlist_id,
            items = total_items,
            tracks = tracks.len(),
            provider = PROVIDER_NAME,
            "Playlist tracks fetched"
        );

        Ok(tracks)
    }

    async fn get_audio_features(&self, track_ids: &[String]) -> AppResult<Vec<ApiAudioFeatures>> {
        if track_ids.is_empty() {
            return Ok(Vec::new());
        }

        let response: ApiAudioFeaturesResponse = self
            .get_json(&["audio-features"], &[ids_param(track_ids)])
            .await?;

        Ok(response.audio_features.into_iter().flatten().collect())
    }

    async fn get_tracks(&self, track_ids: &[String]) -> AppResult<Vec<ApiTrack>> {
        if track_ids.is_empty() {
            return Ok(Vec::new());
        }

        let response: ApiTracksResponse = self.get_json(&["tracks"], &[ids_param(track_ids)]).await?;

        Ok(response.tracks.into_iter().flatten().collect())
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

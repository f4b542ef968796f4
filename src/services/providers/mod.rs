/// Catalog data provider abstraction
///
/// The recommendation engine only ever sees a [`Catalog`](crate::models::Catalog)
/// snapshot; providers are the I/O glue that fetch the raw playlist, track and
/// audio-feature data it is assembled from.
use crate::{
    error::AppResult,
    models::{ApiAudioFeatures, ApiTrack, PlaylistSummary, UserProfile},
};

pub mod spotify;

pub use spotify::SpotifyProvider;

/// Trait for streaming-platform catalog providers
///
/// Implementations fetch one page per call; they hold no per-user or
/// per-playlist state between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch a user's public profile
    async fn get_user(&self, user_id: &str) -> AppResult<UserProfile>;

    /// Fetch a user's public playlists
    async fn get_user_playlists(&self, user_id: &str) -> AppResult<Vec<PlaylistSummary>>;

    /// Fetch the tracks of a playlist
    ///
    /// Removed tracks and local files (no track id) are skipped.
    async fn get_playlist_tracks(&self, playlist_id: &str) -> AppResult<Vec<ApiTrack>>;

    /// Fetch audio features for the given track ids
    ///
    /// Tracks without an analysis are absent from the result.
    async fn get_audio_features(&self, track_ids: &[String]) -> AppResult<Vec<ApiAudioFeatures>>;

    /// Fetch full track details for the given track ids
    async fn get_tracks(&self, track_ids: &[String]) -> AppResult<Vec<ApiTrack>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

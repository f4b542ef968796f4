use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{AudioFeatures, Catalog, RecommendedTrack, Track},
    services::{
        providers::CatalogProvider,
        recommendations::{HybridRanker, RankingOptions, RecommendationOutcome},
    },
};

/// Seed track and the tracks recommended for it, in ranked order
#[derive(Debug, Serialize)]
pub struct TrackRecommendations {
    pub seed: Track,
    pub recommendations: Vec<RecommendedTrack>,
    /// Why the list is empty when no ranking could be computed
    pub empty_reason: Option<String>,
}

/// Builds the catalog snapshot for a playlist
///
/// One row per playlist track, joined by track id with its audio features
/// and popularity. Tracks without features stay in the catalog for display.
pub async fn build_catalog(provider: &dyn CatalogProvider, playlist_id: &str) -> AppResult<Catalog> {
    let start = Instant::now();

    let playlist_tracks = provider.get_playlist_tracks(playlist_id).await?;
    if playlist_tracks.is_empty() {
        tracing::warn!(playlist_id = %playlist_id, "No songs in playlist");
        return Ok(Catalog::default());
    }

    let track_ids: Vec<String> = playlist_tracks
        .iter()
        .filter_map(|track| track.id.clone())
        .collect();

    let (features, details) = tokio::try_join!(
        provider.get_audio_features(&track_ids),
        provider.get_tracks(&track_ids)
    )?;

    let features_by_id: HashMap<String, AudioFeatures> = features
        .into_iter()
        .map(|f| (f.id, f.features))
        .collect();

    let popularity_by_id: HashMap<String, u32> = details
        .into_iter()
        .filter_map(|track| Some((track.id?, track.popularity?)))
        .collect();

    let tracks: Vec<Track> = playlist_tracks
        .into_iter()
        .filter_map(|track| {
            let id = track.id.clone()?;
            let audio_features = features_by_id
                .get(&id)
                .cloned()
                .unwrap_or_default();
            let popularity = popularity_by_id
                .get(&id)
                .copied()
                .or(track.popularity)
                .unwrap_or(0);
            let artists = track.artist_names().join(", ");
            let image = track.cover_image();

            Some(Track {
                id,
                name: track.name,
                artists: Some(artists),
                album_name: Some(track.album.name),
                release_date: track.album.release_date.unwrap_or_default(),
                image,
                popularity,
                audio_features,
            })
        })
        .collect();

    let catalog = Catalog::new(tracks);
    let eligible = catalog.eligible_tracks().len();

    tracing::info!(
        playlist_id = %playlist_id,
        tracks = catalog.len(),
        eligible = eligible,
        processing_time_ms = start.elapsed().as_millis(),
        "Catalog built"
    );

    Ok(catalog)
}

/// Recommends tracks for a playlist track chosen by id
///
/// The catalog is rebuilt for every call. The seed is resolved to its
/// display name and ranked by name, so when several tracks share a name the
/// first one in the playlist is the seed.
pub async fn recommend_for_track(
    provider: &dyn CatalogProvider,
    playlist_id: &str,
    track_id: &str,
    options: RankingOptions,
) -> AppResult<TrackRecommendations> {
    let catalog = build_catalog(provider, playlist_id).await?;

    let seed = catalog.find_by_id(track_id).cloned().ok_or_else(|| {
        AppError::NotFound(format!(
            "Track {} is not in playlist {}",
            track_id, playlist_id
        ))
    })?;

    let outcome = HybridRanker::with_options(&catalog, options).recommend(&seed.name);

    let empty_reason = outcome.empty_reason().map(|reason| reason.to_string());
    let recommendations = match outcome {
        RecommendationOutcome::Ranked(ids) if !ids.is_empty() => {
            fetch_recommended_tracks(provider, &ids).await?
        }
        _ => Vec::new(),
    };

    tracing::info!(
        playlist_id = %playlist_id,
        seed = %seed.id,
        recommendations = recommendations.len(),
        provider = provider.name(),
        "Recommendations completed"
    );

    Ok(TrackRecommendations {
        seed,
        recommendations,
        empty_reason,
    })
}

/// Fetches display details for ranked ids, preserving rank order
async fn fetch_recommended_tracks(
    provider: &dyn CatalogProvider,
    ids: &[String],
) -> AppResult<Vec<RecommendedTrack>> {
    let mut by_id: HashMap<String, RecommendedTrack> = provider
        .get_tracks(ids)
        .await?
        .into_iter()
        .filter_map(|track| RecommendedTrack::try_from(track).ok())
        .map(|track| (track.id.clone(), track))
        .collect();

    let ordered: Vec<RecommendedTrack> = ids.iter().filter_map(|id| by_id.remove(id)).collect();

    if ordered.len() < ids.len() {
        tracing::warn!(
            requested = ids.len(),
            fetched = ordered.len(),
            "Some recommended tracks could not be fetched"
        );
    }

    Ok(ordered)
}

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod track;

pub use catalog::{Catalog, EligibleTrack};
pub use track::{AudioFeature, AudioFeatures, FeatureVector, Track, FEATURE_COUNT};

/// Base URL of the embeddable player for a single track
pub const EMBED_URL_BASE: &str = "https://open.spotify.com/embed/track";

/// Public profile of a platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub image: Option<String>,
}

/// A public playlist as listed for selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

/// Details of one recommended track, ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album_name: Option<String>,
    pub image: Option<String>,
    pub embed_url: String,
}

// ============================================================================
// Spotify Web API Types
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ApiImage {
    pub url: String,
}

/// Response from GET /users/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ApiImage>>,
}

impl From<ApiUser> for UserProfile {
    fn from(user: ApiUser) -> Self {
        UserProfile {
            id: user.id,
            display_name: user.display_name,
            image: first_image(user.images),
        }
    }
}

/// Response from GET /users/{id}/playlists
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlaylistPage {
    #[serde(default)]
    pub items: Vec<ApiPlaylist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Option<Vec<ApiImage>>,
}

impl From<ApiPlaylist> for PlaylistSummary {
    fn from(playlist: ApiPlaylist) -> Self {
        PlaylistSummary {
            id: playlist.id,
            name: playlist.name,
            image: first_image(playlist.images),
        }
    }
}

/// Response from GET /playlists/{id}/tracks
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlaylistTracksPage {
    #[serde(default)]
    pub items: Vec<ApiPlaylistItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPlaylistItem {
    /// Null for removed or unavailable tracks
    #[serde(default)]
    pub track: Option<ApiTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTrack {
    /// Null for local files
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
    pub album: ApiAlbum,
    #[serde(default)]
    pub popularity: Option<u32>,
}

impl ApiTrack {
    pub fn artist_names(&self) -> Vec<String> {
        self.artists.iter().map(|a| a.name.clone()).collect()
    }

    pub fn cover_image(&self) -> Option<String> {
        first_image(self.album.images.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiAlbum {
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<ApiImage>>,
}

/// Response from GET /tracks?ids=...
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTracksResponse {
    #[serde(default)]
    pub tracks: Vec<Option<ApiTrack>>,
}

/// Response from GET /audio-features?ids=...
#[derive(Debug, Clone, Deserialize)]
pub struct ApiAudioFeaturesResponse {
    #[serde(default)]
    pub audio_features: Vec<Option<ApiAudioFeatures>>,
}

/// Audio analysis of one track
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiAudioFeatures {
    pub id: String,
    #[serde(flatten)]
    pub features: AudioFeatures,
}

impl TryFrom<ApiTrack> for RecommendedTrack {
    type Error = ApiTrack;

    /// Fails, handing the track back, when the track has no id
    fn try_from(track: ApiTrack) -> Result<Self, Self::Error> {
        let Some(id) = track.id.clone() else {
            return Err(track);
        };
        Ok(RecommendedTrack {
            embed_url: format!("{}/{}", EMBED_URL_BASE, id),
            artists: track.artist_names(),
            image: track.cover_image(),
            album_name: Some(track.album.name),
            name: track.name,
            id,
        })
    }
}

fn first_image(images: Option<Vec<ApiImage>>) -> Option<String> {
    images
        .and_then(|images| images.into_iter().next())
        .map(|image| image.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_user_to_profile_uses_first_image() {
        let json = r#"{
            "id": "wizzler",
            "display_name": "Wizzler",
            "images": [{"url": "https://i.scdn.co/image/a"}, {"url": "https://i.scdn.co/image/b"}]
        }"#;

        let user: ApiUser = serde_json::from_str(json).unwrap();
        let profile = UserProfile::from(user);
        assert_eq!(profile.id, "wizzler");
        assert_eq!(profile.display_name, Some("Wizzler".to_string()));
        assert_eq!(profile.image, Some("https://i.scdn.co/image/a".to_string()));
    }

    #[test]
    fn test_playlist_with_null_images() {
        let json = r#"{"items": [{"id": "37i9dQZF1DX", "name": "Focus", "images": null}]}"#;

        let page: ApiPlaylistPage = serde_json::from_str(json).unwrap();
        let summaries: Vec<PlaylistSummary> =
            page.items.into_iter().map(PlaylistSummary::from).collect();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Focus");
        assert_eq!(summaries[0].image, None);
    }

    #[test]
    fn test_playlist_items_tolerate_null_tracks_and_local_files() {
        let json = r#"{
            "items": [
                {"track": null},
                {"track": {"id": null, "name": "local.mp3", "artists": [], "album": {"name": "Local"}}},
                {"track": {
                    "id": "11dFghVXANMlKmJXsNCbNl",
                    "name": "Cut To The Feeling",
                    "artists": [{"name": "Carly Rae Jepsen"}],
                    "album": {"name": "Cut To The Feeling", "release_date": "2017-05-26", "images": [{"url": "https://i.scdn.co/image/c"}]},
                    "popularity": 63
                }}
            ]
        }"#;

        let page: ApiPlaylistTracksPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 3);
        assert!(page.items[0].track.is_none());
        assert_eq!(page.items[1].track.as_ref().unwrap().id, None);

        let track = page.items[2].track.clone().unwrap();
        assert_eq!(track.artist_names(), vec!["Carly Rae Jepsen".to_string()]);
        assert_eq!(track.album.release_date, Some("2017-05-26".to_string()));
        assert_eq!(track.popularity, Some(63));
    }

    #[test]
    fn test_audio_features_response_with_null_entry() {
        let json = r#"{
            "audio_features": [
                null,
                {
                    "id": "11dFghVXANMlKmJXsNCbNl",
                    "danceability": 0.696,
                    "energy": 0.905,
                    "key": 2,
                    "loudness": -2.743,
                    "mode": 1,
                    "speechiness": 0.103,
                    "acousticness": 0.011,
                    "instrumentalness": 0.000905,
                    "liveness": 0.302,
                    "valence": 0.625,
                    "tempo": 114.944,
                    "duration_ms": 207960,
                    "time_signature": 4
                }
            ]
        }"#;

        let response: ApiAudioFeaturesResponse = serde_json::from_str(json).unwrap();
        assert!(response.audio_features[0].is_none());

        let features = response.audio_features[1].as_ref().unwrap();
        assert_eq!(features.id, "11dFghVXANMlKmJXsNCbNl");
        assert_eq!(features.features.key, Some(2.0));
        assert!(features.features.to_vector().is_some());
    }

    #[test]
    fn test_recommended_track_from_api_track() {
        let track = ApiTrack {
            id: Some("7ouMYWpwJ422jRcDASZB7P".to_string()),
            name: "Knights of Cydonia".to_string(),
            artists: vec![ApiArtist {
                name: "Muse".to_string(),
            }],
            album: ApiAlbum {
                name: "Black Holes and Revelations".to_string(),
                release_date: Some("2006-06-19".to_string()),
                images: None,
            },
            popularity: Some(70),
        };

        let recommended = RecommendedTrack::try_from(track).unwrap();
        assert_eq!(
            recommended.embed_url,
            "https://open.spotify.com/embed/track/7ouMYWpwJ422jRcDASZB7P"
        );
        assert_eq!(recommended.artists, vec!["Muse".to_string()]);
        assert_eq!(
            recommended.album_name,
            Some("Black Holes and Revelations".to_string())
        );
    }

    #[test]
    fn test_recommended_track_requires_id() {
        let track = ApiTrack {
            id: None,
            name: "local.mp3".to_string(),
            artists: vec![],
            album: ApiAlbum {
                name: "Local".to_string(),
                release_date: None,
                images: None,
            },
            popularity: None,
        };

        assert!(RecommendedTrack::try_from(track).is_err());
    }
}

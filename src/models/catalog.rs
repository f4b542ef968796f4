use serde::{Deserialize, Serialize};

use super::track::{AudioFeature, FeatureVector, Track};

/// Immutable snapshot of one playlist's tracks
///
/// Rebuilt in full for every playlist selection and handed to the engine by
/// reference; the engine never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    tracks: Vec<Track>,
}

/// A catalog row that can take part in similarity scoring
#[derive(Debug, Clone, Copy)]
pub struct EligibleTrack<'a> {
    /// Row position in the full catalog
    pub row: usize,
    pub track: &'a Track,
    pub features: FeatureVector,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Features that no row of the catalog carries a value for
    ///
    /// An empty catalog reports nothing missing; emptiness is its own condition.
    pub fn missing_feature_columns(&self) -> Vec<AudioFeature> {
        if self.tracks.is_empty() {
            return Vec::new();
        }

        AudioFeature::ALL
            .into_iter()
            .filter(|feature| {
                self.tracks
                    .iter()
                    .all(|track| track.audio_features.get(*feature).is_none())
            })
            .collect()
    }

    /// First row with the given display name
    pub fn find_by_name(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Rows with a complete feature vector, in catalog order
    pub fn eligible_tracks(&self) -> Vec<EligibleTrack<'_>> {
        self.tracks
            .iter()
            .enumerate()
            .filter_map(|(row, track)| {
                track.feature_vector().map(|features| EligibleTrack {
                    row,
                    track,
                    features,
                })
            })
            .collect()
    }
}

impl From<Vec<Track>> for Catalog {
    fn from(tracks: Vec<Track>) -> Self {
        Self::new(tracks)
    }
}

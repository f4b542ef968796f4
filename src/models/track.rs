use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of audio features used for similarity scoring
pub const FEATURE_COUNT: usize = 11;

/// Fixed-order feature vector, one value per [`AudioFeature`]
pub type FeatureVector = [f64; FEATURE_COUNT];

/// One of the audio descriptors supplied by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFeature {
    Danceability,
    Energy,
    Key,
    Loudness,
    Mode,
    Speechiness,
    Acousticness,
    Instrumentalness,
    Liveness,
    Valence,
    Tempo,
}

impl AudioFeature {
    /// All features in vector order
    pub const ALL: [AudioFeature; FEATURE_COUNT] = [
        AudioFeature::Danceability,
        AudioFeature::Energy,
        AudioFeature::Key,
        AudioFeature::Loudness,
        AudioFeature::Mode,
        AudioFeature::Speechiness,
        AudioFeature::Acousticness,
        AudioFeature::Instrumentalness,
        AudioFeature::Liveness,
        AudioFeature::Valence,
        AudioFeature::Tempo,
    ];

    /// Column name as it appears in the catalog
    pub fn name(&self) -> &'static str {
        match self {
            AudioFeature::Danceability => "danceability",
            AudioFeature::Energy => "energy",
            AudioFeature::Key => "key",
            AudioFeature::Loudness => "loudness",
            AudioFeature::Mode => "mode",
            AudioFeature::Speechiness => "speechiness",
            AudioFeature::Acousticness => "acousticness",
            AudioFeature::Instrumentalness => "instrumentalness",
            AudioFeature::Liveness => "liveness",
            AudioFeature::Valence => "valence",
            AudioFeature::Tempo => "tempo",
        }
    }
}

impl Display for AudioFeature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Audio features of a single track
///
/// Every value is optional: the provider may return no analysis for a track,
/// or drop individual fields. Only tracks with all eleven values take part in
/// similarity scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub key: Option<f64>,
    pub loudness: Option<f64>,
    pub mode: Option<f64>,
    pub speechiness: Option<f64>,
    pub acousticness: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub liveness: Option<f64>,
    pub valence: Option<f64>,
    pub tempo: Option<f64>,
}

impl AudioFeatures {
    /// Builds a complete feature set from a vector in [`AudioFeature::ALL`] order
    pub fn from_vector(values: FeatureVector) -> Self {
        let [danceability, energy, key, loudness, mode, speechiness, acousticness, instrumentalness, liveness, valence, tempo] =
            values.map(Some);
        Self {
            danceability,
            energy,
            key,
            loudness,
            mode,
            speechiness,
            acousticness,
            instrumentalness,
            liveness,
            valence,
            tempo,
        }
    }

    pub fn get(&self, feature: AudioFeature) -> Option<f64> {
        match feature {
            AudioFeature::Danceability => self.danceability,
            AudioFeature::Energy => self.energy,
            AudioFeature::Key => self.key,
            AudioFeature::Loudness => self.loudness,
            AudioFeature::Mode => self.mode,
            AudioFeature::Speechiness => self.speechiness,
            AudioFeature::Acousticness => self.acousticness,
            AudioFeature::Instrumentalness => self.instrumentalness,
            AudioFeature::Liveness => self.liveness,
            AudioFeature::Valence => self.valence,
            AudioFeature::Tempo => self.tempo,
        }
    }

    /// Returns the feature vector, or `None` if any value is missing or not finite
    pub fn to_vector(&self) -> Option<FeatureVector> {
        let mut vector = [0.0; FEATURE_COUNT];
        for (slot, feature) in vector.iter_mut().zip(AudioFeature::ALL) {
            let value = self.get(feature)?;
            if !value.is_finite() {
                return None;
            }
            *slot = value;
        }
        Some(vector)
    }
}

/// One row of a playlist catalog
///
/// Serialized with the catalog's column names so a collaborator can hand the
/// engine a table of records directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "Track ID")]
    pub id: String,
    /// Display name, not unique within a playlist
    #[serde(rename = "Track Name")]
    pub name: String,
    #[serde(rename = "Artists", default)]
    pub artists: Option<String>,
    #[serde(rename = "Album Name", default)]
    pub album_name: Option<String>,
    /// "YYYY" or "YYYY-MM-DD"
    #[serde(rename = "Release Date", default)]
    pub release_date: String,
    #[serde(rename = "Image", default)]
    pub image: Option<String>,
    #[serde(rename = "Popularity", default)]
    pub popularity: u32,
    #[serde(flatten)]
    pub audio_features: AudioFeatures,
}

impl Track {
    /// Feature vector when the track is eligible for similarity scoring
    pub fn feature_vector(&self) -> Option<FeatureVector> {
        self.audio_features.to_vector()
    }
}

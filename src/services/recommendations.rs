use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AudioFeature, Catalog, FeatureVector};
use crate::services::{features, recency, similarity};

/// Recommendations returned when the caller does not ask for a count
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 5;

/// Extra similarity candidates kept for the popularity re-ranking step
pub const DEFAULT_CANDIDATE_SURPLUS: usize = 5;

/// Why a recommendation request produced nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmptyReason {
    #[error("The catalog is empty")]
    EmptyCatalog,
    #[error("Track \"{0}\" is not in the catalog")]
    SeedNotFound(String),
    #[error("Track \"{0}\" has no complete audio features")]
    SeedMissingFeatures(String),
    #[error("Missing audio features: {}", .0.iter().map(|f| f.name()).collect::<Vec<_>>().join(", "))]
    MissingFeatureColumns(Vec<AudioFeature>),
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),
}

/// Result of one recommendation request
///
/// `Ranked` with an empty list means the seed had no similar tracks;
/// `Empty` means no ranking could be computed at all.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    Ranked(Vec<String>),
    Empty(EmptyReason),
}

impl RecommendationOutcome {
    pub fn track_ids(&self) -> &[String] {
        match self {
            RecommendationOutcome::Ranked(ids) => ids,
            RecommendationOutcome::Empty(_) => &[],
        }
    }

    pub fn into_track_ids(self) -> Vec<String> {
        match self {
            RecommendationOutcome::Ranked(ids) => ids,
            RecommendationOutcome::Empty(_) => Vec::new(),
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            RecommendationOutcome::Ranked(_) => None,
            RecommendationOutcome::Empty(reason) => Some(reason),
        }
    }
}

/// Tunables for the hybrid ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingOptions {
    /// Number of track ids to return
    pub count: usize,
    /// How many candidates beyond `count` the similarity shortlist keeps
    pub candidate_surplus: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_RECOMMENDATION_COUNT,
            candidate_surplus: DEFAULT_CANDIDATE_SURPLUS,
        }
    }
}

/// A similarity-shortlisted track with its final ranking key
#[derive(Debug, Clone)]
struct Candidate<'a> {
    id: &'a str,
    weighted_popularity: f64,
}

/// Hybrid content/popularity ranker over one catalog snapshot
///
/// Shortlists the tracks most similar to the seed by audio features, then
/// re-orders the shortlist by popularity scaled by release recency.
pub struct HybridRanker<'a> {
    catalog: &'a Catalog,
    options: RankingOptions,
}

impl<'a> HybridRanker<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_options(catalog, RankingOptions::default())
    }

    pub fn with_options(catalog: &'a Catalog, options: RankingOptions) -> Self {
        Self { catalog, options }
    }

    /// Recommends tracks similar to the first track named `seed_name`
    pub fn recommend(&self, seed_name: &str) -> RecommendationOutcome {
        self.recommend_at(seed_name, Local::now().date_naive())
    }

    /// Same as [`recommend`](Self::recommend) with recency measured against `today`
    pub fn recommend_at(&self, seed_name: &str, today: NaiveDate) -> RecommendationOutcome {
        let outcome = match self.rank(seed_name, today) {
            Ok(ids) => RecommendationOutcome::Ranked(ids),
            Err(reason) => RecommendationOutcome::Empty(reason),
        };

        match &outcome {
            RecommendationOutcome::Ranked(ids) => tracing::debug!(
                seed = %seed_name,
                recommendations = ids.len(),
                "Recommendations ranked"
            ),
            RecommendationOutcome::Empty(reason) => tracing::warn!(
                seed = %seed_name,
                reason = %reason,
                "No recommendations available"
            ),
        }

        outcome
    }

    fn rank(&self, seed_name: &str, today: NaiveDate) -> Result<Vec<String>, EmptyReason> {
        if self.catalog.is_empty() {
            return Err(EmptyReason::EmptyCatalog);
        }

        let missing = self.catalog.missing_feature_columns();
        if !missing.is_empty() {
            return Err(EmptyReason::MissingFeatureColumns(missing));
        }

        let seed = self
            .catalog
            .find_by_name(seed_name)
            .ok_or_else(|| EmptyReason::SeedNotFound(seed_name.to_string()))?;

        // Rows lacking features are kept for display but not scored
        let eligible = self.catalog.eligible_tracks();
        let seed_index = eligible
            .iter()
            .position(|e| e.track.name == seed_name)
            .ok_or_else(|| EmptyReason::SeedMissingFeatures(seed_name.to_string()))?;
        let seed_id = eligible[seed_index].track.id.as_str();

        let matrix: Vec<FeatureVector> = eligible.iter().map(|e| e.features).collect();
        let scaled = features::normalize(&matrix);
        let scores = similarity::similarity_scores(&scaled, seed_index)
            .ok_or_else(|| EmptyReason::SeedNotFound(seed.name.clone()))?;

        let shortlist_len = self.options.count.saturating_add(self.options.candidate_surplus);
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates: Vec<Candidate<'_>> = similarity::rank_by_similarity(&scores)
            .into_iter()
            .map(|index| eligible[index].track)
            .filter(|&track| track.id != seed_id && seen.insert(track.id.as_str()))
            .take(shortlist_len)
            .map(|track| Candidate {
                id: track.id.as_str(),
                weighted_popularity: track.popularity as f64
                    * recency::recency_weight_at(&track.release_date, today),
            })
            .collect();

        // Stable sort: equal weights keep similarity order
        candidates.sort_by(|a, b| {
            b.weighted_popularity
                .partial_cmp(&a.weighted_popularity)
                .unwrap_or(Ordering::Equal)
        });

        Ok(candidates
            .into_iter()
            .take(self.options.count)
            .map(|c| c.id.to_string())
            .collect())
    }
}

/// Recommends up to `count` track ids similar to the track named `seed_name`
pub fn recommend(catalog: &Catalog, seed_name: &str, count: usize) -> RecommendationOutcome {
    HybridRanker::with_options(
        catalog,
        RankingOptions {
            count,
            ..RankingOptions::default()
        },
    )
    .recommend(seed_name)
}

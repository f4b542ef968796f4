use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Catalog,
    routes::AppState,
    services::{
        recency,
        recommendations::{EmptyReason, HybridRanker, RankingOptions, RecommendationOutcome},
    },
};

/// Body of `POST /recommendations`
///
/// The catalog stays raw JSON so a bad row becomes an empty outcome
/// instead of a rejected request.
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub catalog: Value,
    pub seed_track_name: String,
    pub count: Option<usize>,
    pub candidate_surplus: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Ranked,
    Empty,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub status: OutcomeStatus,
    pub track_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<RecommendationOutcome> for RecommendationResponse {
    fn from(outcome: RecommendationOutcome) -> Self {
        match outcome {
            RecommendationOutcome::Ranked(track_ids) => Self {
                status: OutcomeStatus::Ranked,
                track_ids,
                reason: None,
            },
            RecommendationOutcome::Empty(reason) => Self {
                status: OutcomeStatus::Empty,
                track_ids: Vec::new(),
                reason: Some(reason.to_string()),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecencyQuery {
    release_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecencyResponse {
    pub release_date: String,
    pub weight: f64,
}

/// Handler ranking a caller-supplied catalog
///
/// An empty outcome is a normal 200 response carrying the reason.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    let options = RankingOptions {
        count: request.count.unwrap_or(state.ranking.count),
        candidate_surplus: request
            .candidate_surplus
            .unwrap_or(state.ranking.candidate_surplus),
    };

    let outcome = rank_supplied_catalog(request.catalog, &request.seed_track_name, options);

    Ok(Json(RecommendationResponse::from(outcome)))
}

/// Decodes a caller-supplied catalog and ranks it
fn rank_supplied_catalog(
    catalog: Value,
    seed_track_name: &str,
    options: RankingOptions,
) -> RecommendationOutcome {
    match serde_json::from_value::<Catalog>(catalog) {
        Ok(catalog) => HybridRanker::with_options(&catalog, options).recommend(seed_track_name),
        Err(e) => {
            tracing::warn!(
                seed = %seed_track_name,
                error = %e,
                "Supplied catalog could not be decoded"
            );
            RecommendationOutcome::Empty(EmptyReason::MalformedCatalog(e.to_string()))
        }
    }
}

/// Handler exposing the recency weight of a release date
pub async fn recency_weight(
    Query(params): Query<RecencyQuery>,
) -> AppResult<Json<RecencyResponse>> {
    let release_date = params
        .release_date
        .ok_or_else(|| AppError::InvalidInput("release_date is required".to_string()))?;

    let weight = recency::recency_weight(&release_date);
    Ok(Json(RecencyResponse {
        release_date,
        weight,
    }))
}

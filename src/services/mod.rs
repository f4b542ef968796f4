pub mod features;
pub mod playlists;
pub mod providers;
pub mod recency;
pub mod recommendations;
pub mod similarity;

pub use recency::recency_weight;
pub use recommendations::{
    recommend, EmptyReason, HybridRanker, RankingOptions, RecommendationOutcome,
};

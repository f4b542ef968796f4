use serde::Deserialize;

use crate::services::recommendations::{
    RankingOptions, DEFAULT_CANDIDATE_SURPLUS, DEFAULT_RECOMMENDATION_COUNT,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Bearer token for the Spotify Web API, issued out of band
    pub spotify_access_token: String,

    /// Spotify Web API base URL
    #[serde(default = "default_spotify_api_url")]
    pub spotify_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned when a request does not ask for a count
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Extra similarity candidates handed to the popularity re-ranking step
    #[serde(default = "default_candidate_surplus")]
    pub candidate_surplus: usize,
}

fn default_spotify_api_url() -> String {
    "https://api.spotify.com/v1".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_count() -> usize {
    DEFAULT_RECOMMENDATION_COUNT
}

fn default_candidate_surplus() -> usize {
    DEFAULT_CANDIDATE_SURPLUS
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Ranking defaults applied to every recommendation request
    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            count: self.recommendation_count,
            candidate_surplus: self.candidate_surplus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let vars = vec![(
            "SPOTIFY_ACCESS_TOKEN".to_string(),
            "token".to_string(),
        )];
        let config: Config = envy::from_iter(vars).unwrap();

        assert_eq!(config.spotify_api_url, "https://api.spotify.com/v1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.recommendation_count, 5);
        assert_eq!(config.candidate_surplus, 5);
    }

    #[test]
    fn test_candidate_surplus_override() {
        let vars = vec![
            ("SPOTIFY_ACCESS_TOKEN".to_string(), "token".to_string()),
            ("CANDIDATE_SURPLUS".to_string(), "10".to_string()),
            ("RECOMMENDATION_COUNT".to_string(), "3".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();

        let options = config.ranking_options();
        assert_eq!(options.count, 3);
        assert_eq!(options.candidate_surplus, 10);
    }

    #[test]
    fn test_missing_token_fails() {
        let vars: Vec<(String, String)> = vec![];
        assert!(envy::from_iter::<_, Config>(vars).is_err());
    }
}

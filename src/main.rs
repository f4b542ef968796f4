use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playlist_recs::{
    config::Config,
    routes::{create_router, AppState},
    services::providers::SpotifyProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playlist_recs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let provider = SpotifyProvider::new(
        config.spotify_access_token.clone(),
        config.spotify_api_url.clone(),
    );
    let state = AppState::new(Arc::new(provider), config.ranking_options());

    tracing::info!(
        api_url = %config.spotify_api_url,
        recommendation_count = config.recommendation_count,
        candidate_surplus = config.candidate_surplus,
        "Configuration loaded"
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");

    axum::serve(listener, app).await?;

    Ok(())
}

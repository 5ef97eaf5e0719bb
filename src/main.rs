use anyhow::{Context, Result};
use moodtunes::{api, config::Config, spotify::SpotifyClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtunes=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables if .env exists
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    if config.client_id.is_none() {
        tracing::warn!("SPOTIFY_CLIENT_ID is not set, /login will fail until it is");
    }

    let client = SpotifyClient::new(&config).context("Failed to build Spotify client")?;
    let static_dir = config.static_dir.clone();
    let port = config.port;

    let app = api::create_router(api::AppState::new(config, Arc::new(client)))
        .fallback_service(ServeDir::new(&static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}, serving {}", addr, static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

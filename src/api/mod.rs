use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::models::{MoodLabel, Playlist, Track};
use crate::resolvers::{PlaylistResolver, RecommendationResolver, ResolveError};
use crate::session::Session;
use crate::spotify::{self, MusicService};


pub const AUTHENTICATED_REDIRECT: &str = "/#authenticated";
pub const AUTH_FAILED_REDIRECT: &str = "/#error=authentication_failed";

pub struct AppState {
    pub config: Config,
    pub service: Arc<dyn MusicService>,
    pub session: Session,
    pub recommendations: RecommendationResolver,
    pub playlists: PlaylistResolver,
}

impl AppState {
    pub fn new(config: Config, service: Arc<dyn MusicService>) -> Self {
        Self {
            recommendations: RecommendationResolver::new(
                service.clone(),
                config.default_market.clone(),
            ),
            playlists: PlaylistResolver::new(service.clone()),
            session: Session::new(),
            config,
            service,
        }
    }

    pub fn with_playlist_resolver(mut self, playlists: PlaylistResolver) -> Self {
        self.playlists = playlists;
        self
    }
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct TracksResponse {
    tracks: Vec<Track>,
}

#[derive(Serialize)]
pub struct PlaylistsResponse {
    playlists: PlaylistPage,
}

#[derive(Serialize)]
pub struct PlaylistPage {
    items: Vec<Playlist>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ResolveError::InvalidMood(e) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "Invalid mood".to_string(),
                    details: Some(e.to_string()),
                },
            ),
            ResolveError::NoTracks { mood, details } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: format!("No tracks found for mood: {}", mood),
                    details,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/login", get(login_handler))
        .route("/callback", get(callback_handler))
        .route("/recommendations/:mood", get(recommendations_handler))
        .route("/playlists/:mood", get(playlists_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(state))
}

async fn login_handler(State(state): State<Arc<AppState>>) -> Response {
    match spotify::authorize_url(&state.config) {
        Ok(url) => {
            tracing::info!("Redirecting to Spotify authorization");
            Redirect::to(&url).into_response()
        }
        Err(e) => {
            tracing::error!("Cannot start login: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Spotify Client ID not configured",
            )
                .into_response()
        }
    }
}

async fn callback_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Redirect {
    if let Some(error) = params.error {
        tracing::warn!("Authorization denied: {}", error);
        return Redirect::to(AUTH_FAILED_REDIRECT);
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        tracing::warn!("Callback without authorization code");
        return Redirect::to(AUTH_FAILED_REDIRECT);
    };

    match state.service.exchange_code(&code).await {
        Ok(grant) => {
            state.session.set_from_grant(grant).await;
            Redirect::to(AUTHENTICATED_REDIRECT)
        }
        Err(e) => {
            tracing::error!("Error getting tokens: {}", e);
            Redirect::to(AUTH_FAILED_REDIRECT)
        }
    }
}

async fn recommendations_handler(
    State(state): State<Arc<AppState>>,
    Path(mood): Path<String>,
) -> Result<Json<TracksResponse>, ResolveError> {
    let mood: MoodLabel = mood.parse()?;
    let tracks = state
        .recommendations
        .resolve(&state.session, mood)
        .await?;

    Ok(Json(TracksResponse { tracks }))
}

async fn playlists_handler(
    State(state): State<Arc<AppState>>,
    Path(mood): Path<String>,
) -> Json<PlaylistsResponse> {
    let mood = mood.parse().unwrap_or_else(|e| {
        tracing::warn!("{}, using {}", e, MoodLabel::Happy);
        MoodLabel::Happy
    });
    let items = state.playlists.resolve(&state.session, mood).await;

    Json(PlaylistsResponse {
        playlists: PlaylistPage { items },
    })
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": state.session.is_authenticated().await,
        "token_obtained_at": state.session.obtained_at().await,
    }))
}

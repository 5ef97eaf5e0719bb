mod client;
mod error;
mod types;


use async_trait::async_trait;

use crate::models::{PlaylistItem, Track};

pub use client::{authorize_url, SpotifyClient, LOGIN_SCOPES};
pub use error::SpotifyError;
pub use types::{
    Artist, RecommendationQuery, TimeRange, TokenGrant, TokenPair, UserProfile,
};

pub type SpotifyResult<T> = Result<T, SpotifyError>;

/// Capabilities of the external music service that the resolvers consume.
///
/// Every privileged call takes the access token explicitly; the caller owns
/// the token lifecycle (see [`crate::session::Session`]).
#[async_trait]
pub trait MusicService: Send + Sync {
    async fn exchange_code(&self, code: &str) -> SpotifyResult<TokenGrant>;

    async fn refresh_access_token(&self, refresh_token: &str) -> SpotifyResult<TokenGrant>;

    async fn current_user(&self, token: &str) -> SpotifyResult<UserProfile>;

    async fn top_artists(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> SpotifyResult<Vec<Artist>>;

    async fn top_tracks(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> SpotifyResult<Vec<Track>>;

    /// Single artist lookup. Part of the client contract; the resolvers get
    /// genres from `top_artists` instead.
    async fn artist(&self, token: &str, id: &str) -> SpotifyResult<Artist>;

    async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        market: &str,
        limit: u32,
    ) -> SpotifyResult<Vec<Track>>;

    /// Raw search items; the service may return nulls or incomplete entries.
    async fn search_playlists(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> SpotifyResult<Vec<Option<PlaylistItem>>>;

    async fn recommendations(
        &self,
        token: &str,
        query: &RecommendationQuery,
    ) -> SpotifyResult<Vec<Track>>;
}

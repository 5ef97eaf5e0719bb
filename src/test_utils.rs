// Scriptable stand-in for the Spotify client, recording every call
use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::models::{ExternalUrls, Owner, PlaylistItem, Track};
use crate::spotify::{
    Artist, MusicService, RecommendationQuery, SpotifyError, SpotifyResult, TimeRange, TokenGrant,
    UserProfile,
};

/// Scripted outcome: `Err(status)` becomes a `SpotifyError::Api`.
pub type Scripted<T> = Result<T, StatusCode>;

#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub args: Vec<String>,
}

struct StubState {
    exchange: Scripted<TokenGrant>,
    refresh: Scripted<TokenGrant>,
    refresh_delay: Option<Duration>,
    profile: Scripted<UserProfile>,
    top_artists: Scripted<Vec<Artist>>,
    top_tracks: Scripted<Vec<Track>>,
    search_tracks: Scripted<Vec<Track>>,
    playlist_search: Scripted<Vec<Option<PlaylistItem>>>,
    playlist_search_by_term: HashMap<String, Scripted<Vec<Option<PlaylistItem>>>>,
    recommendations: Scripted<Vec<Track>>,
    calls: Vec<Call>,
}

impl StubState {
    fn answering(outcome: Scripted<()>) -> Self {
        Self {
            exchange: outcome.map(|_| grant("access-token", Some("refresh-token"))),
            refresh: outcome.map(|_| grant("refreshed-token", None)),
            refresh_delay: None,
            profile: outcome.map(|_| UserProfile {
                id: "user".to_string(),
                display_name: Some("Test User".to_string()),
                country: Some("SE".to_string()),
            }),
            top_artists: outcome.map(|_| Vec::new()),
            top_tracks: outcome.map(|_| Vec::new()),
            search_tracks: outcome.map(|_| Vec::new()),
            playlist_search: outcome.map(|_| Vec::new()),
            playlist_search_by_term: HashMap::new(),
            recommendations: outcome.map(|_| Vec::new()),
            calls: Vec::new(),
        }
    }
}

pub struct StubMusicService {
    state: Mutex<StubState>,
}

impl Default for StubMusicService {
    fn default() -> Self {
        Self::new()
    }
}

impl StubMusicService {
    /// Every call succeeds with an empty result.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StubState::answering(Ok(()))),
        }
    }

    /// Every call fails with a 500.
    pub fn failing() -> Self {
        Self {
            state: Mutex::new(StubState::answering(Err(StatusCode::INTERNAL_SERVER_ERROR))),
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut StubState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn set_exchange(&self, outcome: Scripted<TokenGrant>) {
        self.with_state(|s| s.exchange = outcome);
    }

    pub fn set_refresh(&self, outcome: Scripted<TokenGrant>) {
        self.with_state(|s| s.refresh = outcome);
    }

    pub fn set_refresh_delay(&self, delay: Duration) {
        self.with_state(|s| s.refresh_delay = Some(delay));
    }

    pub fn set_profile(&self, outcome: Scripted<UserProfile>) {
        self.with_state(|s| s.profile = outcome);
    }

    pub fn set_top_artists(&self, outcome: Scripted<Vec<Artist>>) {
        self.with_state(|s| s.top_artists = outcome);
    }

    pub fn set_top_tracks(&self, outcome: Scripted<Vec<Track>>) {
        self.with_state(|s| s.top_tracks = outcome);
    }

    pub fn set_search_tracks(&self, outcome: Scripted<Vec<Track>>) {
        self.with_state(|s| s.search_tracks = outcome);
    }

    /// Answer for every playlist search term without a specific script.
    pub fn set_playlist_search(&self, outcome: Scripted<Vec<Option<PlaylistItem>>>) {
        self.with_state(|s| s.playlist_search = outcome);
    }

    pub fn set_playlist_search_for(&self, term: &str, outcome: Scripted<Vec<Option<PlaylistItem>>>) {
        self.with_state(|s| {
            s.playlist_search_by_term.insert(term.to_string(), outcome);
        });
    }

    pub fn set_recommendations(&self, outcome: Scripted<Vec<Track>>) {
        self.with_state(|s| s.recommendations = outcome);
    }

    pub fn calls(&self, method: &str) -> usize {
        self.with_state(|s| s.calls.iter().filter(|c| c.method == method).count())
    }

    /// Arguments of every recorded call to `method`, in call order.
    pub fn args(&self, method: &str) -> Vec<Vec<String>> {
        self.with_state(|s| {
            s.calls
                .iter()
                .filter(|c| c.method == method)
                .map(|c| c.args.clone())
                .collect()
        })
    }

    pub fn refresh_tokens_seen(&self) -> Vec<String> {
        self.args("refresh_access_token")
            .into_iter()
            .filter_map(|args| args.into_iter().next())
            .collect()
    }

    fn record<T: Clone>(
        &self,
        method: &'static str,
        args: &[&str],
        pick: impl FnOnce(&StubState) -> Scripted<T>,
    ) -> SpotifyResult<T> {
        self.with_state(|s| {
            s.calls.push(Call {
                method,
                args: args.iter().map(|a| a.to_string()).collect(),
            });
            pick(s).map_err(|status| SpotifyError::Api {
                status,
                message: format!("stubbed {} failure", method),
            })
        })
    }
}

#[async_trait]
impl MusicService for StubMusicService {
    async fn exchange_code(&self, code: &str) -> SpotifyResult<TokenGrant> {
        self.record("exchange_code", &[code], |s| s.exchange.clone())
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> SpotifyResult<TokenGrant> {
        let delay = self.with_state(|s| s.refresh_delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.record("refresh_access_token", &[refresh_token], |s| {
            s.refresh.clone()
        })
    }

    async fn current_user(&self, token: &str) -> SpotifyResult<UserProfile> {
        self.record("current_user", &[token], |s| s.profile.clone())
    }

    async fn top_artists(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> SpotifyResult<Vec<Artist>> {
        let limit = limit.to_string();
        self.record("top_artists", &[token, range.as_str(), limit.as_str()], |s| {
            s.top_artists.clone()
        })
    }

    async fn top_tracks(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> SpotifyResult<Vec<Track>> {
        let limit = limit.to_string();
        self.record("top_tracks", &[token, range.as_str(), limit.as_str()], |s| {
            s.top_tracks.clone()
        })
    }

    async fn artist(&self, token: &str, id: &str) -> SpotifyResult<Artist> {
        self.record("artist", &[token, id], |s| {
            s.top_artists.clone().and_then(|artists| {
                artists
                    .into_iter()
                    .find(|a| a.id == id)
                    .ok_or(StatusCode::NOT_FOUND)
            })
        })
    }

    async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        market: &str,
        limit: u32,
    ) -> SpotifyResult<Vec<Track>> {
        let limit = limit.to_string();
        self.record("search_tracks", &[token, query, market, limit.as_str()], |s| {
            s.search_tracks.clone()
        })
    }

    async fn search_playlists(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> SpotifyResult<Vec<Option<PlaylistItem>>> {
        let limit = limit.to_string();
        self.record("search_playlists", &[token, query, limit.as_str()], |s| {
            s.playlist_search_by_term
                .get(query)
                .cloned()
                .unwrap_or_else(|| s.playlist_search.clone())
        })
    }

    async fn recommendations(
        &self,
        token: &str,
        query: &RecommendationQuery,
    ) -> SpotifyResult<Vec<Track>> {
        let seed_artists = query.seed_artists.join(",");
        let seed_tracks = query.seed_tracks.join(",");
        let limit = query.limit.to_string();
        self.record(
            "recommendations",
            &[
                token,
                seed_artists.as_str(),
                seed_tracks.as_str(),
                query.market.as_str(),
                limit.as_str(),
            ],
            |s| s.recommendations.clone(),
        )
    }
}

pub fn grant(access: &str, refresh: Option<&str>) -> TokenGrant {
    TokenGrant {
        access_token: access.to_string(),
        refresh_token: refresh.map(|r| r.to_string()),
        expires_in: Some(3600),
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id.to_string(), format!("Track {}", id))
        .with_artist(format!("artist-{}", id), format!("Artist {}", id))
        .with_external_url(format!("https://open.spotify.com/track/{}", id))
}

/// Tracks `prefix0`, `prefix1`, ... `prefix{count-1}`.
pub fn tracks(prefix: &str, count: usize) -> Vec<Track> {
    (0..count).map(|i| track(&format!("{}{}", prefix, i))).collect()
}

pub fn artist(id: &str, genres: &[&str]) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("Artist {}", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub fn playlist_item(id: &str) -> Option<PlaylistItem> {
    Some(PlaylistItem {
        id: Some(id.to_string()),
        name: Some(format!("Playlist {}", id)),
        owner: Some(Owner {
            display_name: Some("curator".to_string()),
        }),
        images: Some(Vec::new()),
        external_urls: Some(ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/playlist/{}", id)),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_records_calls() {
        let stub = StubMusicService::new();
        stub.search_tracks("tok", "happy upbeat", "SE", 15)
            .await
            .unwrap();

        assert_eq!(stub.calls("search_tracks"), 1);
        assert_eq!(
            stub.args("search_tracks"),
            vec![vec![
                "tok".to_string(),
                "happy upbeat".to_string(),
                "SE".to_string(),
                "15".to_string()
            ]]
        );
    }

    #[tokio::test]
    async fn test_failing_stub_fails_everything() {
        let stub = StubMusicService::failing();

        assert!(stub.current_user("tok").await.is_err());
        assert!(stub.search_playlists("tok", "x", 3).await.is_err());
        assert!(stub.exchange_code("code").await.is_err());
    }

    #[tokio::test]
    async fn test_per_term_playlist_script() {
        let stub = StubMusicService::new();
        stub.set_playlist_search_for("chill", Ok(vec![playlist_item("p1")]));

        assert_eq!(stub.search_playlists("tok", "chill", 3).await.unwrap().len(), 1);
        assert!(stub.search_playlists("tok", "calm", 3).await.unwrap().is_empty());
    }

    #[test]
    fn test_tracks_helper() {
        let tracks = tracks("a", 3);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[2].id, "a2");
    }
}

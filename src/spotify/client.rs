use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{
    Paging, PlaylistSearchResponse, RecommendationsResponse, TrackSearchResponse,
};
use super::{
    Artist, MusicService, RecommendationQuery, SpotifyError, SpotifyResult, TimeRange, TokenGrant,
    UserProfile,
};
use crate::config::Config;
use crate::models::{PlaylistItem, Track};

pub const LOGIN_SCOPES: [&str; 4] = [
    "user-read-private",
    "user-read-email",
    "playlist-read-private",
    "user-top-read",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// URL the user is sent to for granting access with [`LOGIN_SCOPES`].
pub fn authorize_url(config: &Config) -> SpotifyResult<String> {
    let client_id = config
        .client_id
        .as_deref()
        .ok_or(SpotifyError::MissingCredentials)?;

    Ok(format!(
        "{}/authorize?response_type=code&client_id={}&scope={}&redirect_uri={}",
        config.accounts_url,
        urlencoding::encode(client_id),
        urlencoding::encode(&LOGIN_SCOPES.join(" ")),
        urlencoding::encode(&config.redirect_uri),
    ))
}

pub struct SpotifyClient {
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: String,
    api_url: String,
    accounts_url: String,
    client: reqwest::Client,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> SpotifyResult<Self> {
        Ok(Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            api_url: config.api_url.clone(),
            accounts_url: config.accounts_url.clone(),
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
        })
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> SpotifyResult<TokenGrant> {
        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            return Err(SpotifyError::MissingCredentials);
        };

        let response = self
            .client
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(client_id, Some(client_secret))
            .form(form)
            .send()
            .await?;

        let grant: TokenGrant = parse_json(response).await?;
        if grant.access_token.is_empty() {
            return Err(SpotifyError::InvalidResponse(
                "token response without access_token".to_string(),
            ));
        }
        Ok(grant)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        params: &[(String, String)],
    ) -> SpotifyResult<T> {
        tracing::debug!("GET {}{}", self.api_url, path);

        let response = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(token)
            .query(params)
            .send()
            .await?;

        parse_json(response).await
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> SpotifyResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(SpotifyError::Api { status, message });
    }

    Ok(response.json::<T>().await?)
}

fn params(pairs: &[(&str, String)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[async_trait]
impl MusicService for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> SpotifyResult<TokenGrant> {
        self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    async fn refresh_access_token(&self, refresh_token: &str) -> SpotifyResult<TokenGrant> {
        self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn current_user(&self, token: &str) -> SpotifyResult<UserProfile> {
        self.get_json(token, "/me", &[]).await
    }

    async fn top_artists(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> SpotifyResult<Vec<Artist>> {
        let page: Paging<Artist> = self
            .get_json(
                token,
                "/me/top/artists",
                &params(&[
                    ("time_range", range.as_str().to_string()),
                    ("limit", limit.to_string()),
                ]),
            )
            .await?;
        Ok(page.items)
    }

    async fn top_tracks(
        &self,
        token: &str,
        range: TimeRange,
        limit: u32,
    ) -> SpotifyResult<Vec<Track>> {
        let page: Paging<Track> = self
            .get_json(
                token,
                "/me/top/tracks",
                &params(&[
                    ("time_range", range.as_str().to_string()),
                    ("limit", limit.to_string()),
                ]),
            )
            .await?;
        Ok(page.items)
    }

    async fn artist(&self, token: &str, id: &str) -> SpotifyResult<Artist> {
        let path = format!("/artists/{}", urlencoding::encode(id));
        self.get_json(token, &path, &[]).await
    }

    async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        market: &str,
        limit: u32,
    ) -> SpotifyResult<Vec<Track>> {
        let response: TrackSearchResponse = self
            .get_json(
                token,
                "/search",
                &params(&[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("market", market.to_string()),
                    ("limit", limit.to_string()),
                ]),
            )
            .await?;
        Ok(response.tracks.items)
    }

    async fn search_playlists(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> SpotifyResult<Vec<Option<PlaylistItem>>> {
        let response: PlaylistSearchResponse = self
            .get_json(
                token,
                "/search",
                &params(&[
                    ("q", query.to_string()),
                    ("type", "playlist".to_string()),
                    ("limit", limit.to_string()),
                ]),
            )
            .await?;
        Ok(response.playlists.items)
    }

    async fn recommendations(
        &self,
        token: &str,
        query: &RecommendationQuery,
    ) -> SpotifyResult<Vec<Track>> {
        let response: RecommendationsResponse = self
            .get_json(token, "/recommendations", &query.to_params())
            .await?;
        Ok(response.tracks)
    }
}

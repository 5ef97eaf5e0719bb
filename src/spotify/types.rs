use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{FeatureTarget, PlaylistItem, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Short,
    Medium,
    Long,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Short => "short_term",
            TimeRange::Medium => "medium_term",
            TimeRange::Long => "long_term",
        }
    }
}

/// Result of an authorization-code or refresh-token grant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Refresh grants may omit this, in which case the old one stays valid.
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub obtained_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    pub seed_artists: Vec<String>,
    pub seed_tracks: Vec<String>,
    pub features: Vec<FeatureTarget>,
    pub market: String,
    pub limit: u32,
}

impl RecommendationQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("limit".to_string(), self.limit.to_string())];
        if !self.market.is_empty() {
            params.push(("market".to_string(), self.market.clone()));
        }
        if !self.seed_artists.is_empty() {
            params.push(("seed_artists".to_string(), self.seed_artists.join(",")));
        }
        if !self.seed_tracks.is_empty() {
            params.push(("seed_tracks".to_string(), self.seed_tracks.join(",")));
        }
        for feature in &self.features {
            params.push((feature.param_name(), feature.value.to_string()));
        }
        params
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackSearchResponse {
    pub tracks: Paging<Track>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistSearchResponse {
    pub playlists: Paging<Option<PlaylistItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

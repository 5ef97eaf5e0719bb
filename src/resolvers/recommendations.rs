use std::sync::Arc;

use super::{
    Collected, ResolveError, MAX_RECOMMENDATION_TRACKS, MIN_RECOMMENDATION_TRACKS,
    SEED_ARTIST_LIMIT, SEED_TRACK_LIMIT, TRACK_SEARCH_KEYWORDS, TRACK_SEARCH_LIMIT,
};
use crate::models::{MoodLabel, Track};
use crate::session::Session;
use crate::spotify::{MusicService, RecommendationQuery, SpotifyResult, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationTier {
    /// Recommendation endpoint anchored on the user's top artists and tracks.
    Seeded,
    /// Track search over the mood's top ranked keywords.
    KeywordSearch,
}

impl RecommendationTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationTier::Seeded => "seeded",
            RecommendationTier::KeywordSearch => "keyword-search",
        }
    }
}

pub const RECOMMENDATION_TIERS: [RecommendationTier; 2] = [
    RecommendationTier::Seeded,
    RecommendationTier::KeywordSearch,
];

/// Seeds for one recommendation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet {
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
}

impl SeedSet {
    pub fn is_empty(&self) -> bool {
        self.artists.is_empty() && self.tracks.is_empty()
    }
}

struct Request {
    mood: MoodLabel,
    token: String,
    market: String,
    seeds: SeedSet,
}

pub struct RecommendationResolver {
    service: Arc<dyn MusicService>,
    default_market: String,
}

impl RecommendationResolver {
    pub fn new(service: Arc<dyn MusicService>, default_market: String) -> Self {
        Self {
            service,
            default_market,
        }
    }

    /// Up to [`MAX_RECOMMENDATION_TRACKS`] tracks for `mood`, recommendations
    /// first, then keyword search hits.
    pub async fn resolve(
        &self,
        session: &Session,
        mood: MoodLabel,
    ) -> Result<Vec<Track>, ResolveError> {
        let token = session.refresh(self.service.as_ref()).await;
        let market = self.market(&token).await;
        let seeds = self.seeds(&token).await;

        tracing::debug!(
            "Resolving {} recommendations: market {}, {} seed artists, {} seed tracks",
            mood,
            market,
            seeds.artists.len(),
            seeds.tracks.len()
        );

        let request = Request {
            mood,
            token,
            market,
            seeds,
        };

        let mut collected = Collected::with_cap(MAX_RECOMMENDATION_TRACKS);
        let mut last_error = None;

        for tier in RECOMMENDATION_TIERS {
            if collected.len() >= MIN_RECOMMENDATION_TRACKS {
                break;
            }

            match self.attempt(tier, &request).await {
                Ok(tracks) => {
                    let found = tracks.len();
                    let added = collected.extend(tracks);
                    tracing::info!(
                        "Tier {} for {}: {} tracks, {} new",
                        tier.as_str(),
                        mood,
                        found,
                        added
                    );
                }
                Err(e) => {
                    tracing::warn!("Tier {} failed for {}: {}", tier.as_str(), mood, e);
                    last_error = Some(e.to_string());
                }
            }
        }

        if collected.is_empty() {
            return Err(ResolveError::NoTracks {
                mood,
                details: last_error,
            });
        }

        Ok(collected.into_vec())
    }

    async fn attempt(
        &self,
        tier: RecommendationTier,
        request: &Request,
    ) -> SpotifyResult<Vec<Track>> {
        match tier {
            RecommendationTier::Seeded => {
                if request.seeds.is_empty() {
                    tracing::debug!("No seeds available, skipping recommendation endpoint");
                    return Ok(Vec::new());
                }

                let query = RecommendationQuery {
                    seed_artists: request.seeds.artists.clone(),
                    seed_tracks: request.seeds.tracks.clone(),
                    features: request.mood.profile().features.to_vec(),
                    market: request.market.clone(),
                    limit: MAX_RECOMMENDATION_TRACKS as u32,
                };
                self.service.recommendations(&request.token, &query).await
            }
            RecommendationTier::KeywordSearch => {
                let query = request.mood.profile().keyword_query(TRACK_SEARCH_KEYWORDS);
                self.service
                    .search_tracks(&request.token, &query, &request.market, TRACK_SEARCH_LIMIT)
                    .await
            }
        }
    }

    async fn market(&self, token: &str) -> String {
        match self.service.current_user(token).await {
            Ok(profile) => profile
                .country
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| self.default_market.clone()),
            Err(e) => {
                tracing::warn!("Could not look up user market: {}", e);
                self.default_market.clone()
            }
        }
    }

    /// An empty seed set is a valid outcome, never an error.
    pub async fn seeds(&self, token: &str) -> SeedSet {
        let artists = match self
            .service
            .top_artists(token, TimeRange::Medium, SEED_ARTIST_LIMIT)
            .await
        {
            Ok(artists) => artists.into_iter().map(|a| a.id).collect(),
            Err(e) => {
                tracing::warn!("Could not fetch top artists for seeds: {}", e);
                Vec::new()
            }
        };

        let tracks = match self
            .service
            .top_tracks(token, TimeRange::Medium, SEED_TRACK_LIMIT)
            .await
        {
            Ok(tracks) => tracks.into_iter().map(|t| t.id).collect(),
            Err(e) => {
                tracing::warn!("Could not fetch top tracks for seeds: {}", e);
                Vec::new()
            }
        };

        SeedSet {
            artists: take(artists, SEED_ARTIST_LIMIT),
            tracks: take(tracks, SEED_TRACK_LIMIT),
        }
    }
}

fn take(mut ids: Vec<String>, limit: u32) -> Vec<String> {
    ids.truncate(limit as usize);
    ids
}

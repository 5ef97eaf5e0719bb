use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

use super::{
    Collected, GENRE_ARTIST_LIMIT, GENRE_COMBINATIONS, MAX_PLAYLISTS, MIN_PLAYLISTS,
    PLAYLISTS_PER_TERM, PLAYLIST_SEARCH_TERMS,
};
use crate::models::{MoodLabel, MoodProfile, Playlist, PlaylistItem};
use crate::session::Session;
use crate::spotify::{MusicService, SpotifyError, SpotifyResult, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistTier {
    /// Playlist search over shuffled mood keywords and genre combinations.
    Search,
    /// Fixed per-mood list of known playlist ids.
    KnownPlaylists,
}

impl PlaylistTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistTier::Search => "search",
            PlaylistTier::KnownPlaylists => "known-playlists",
        }
    }
}

pub const PLAYLIST_TIERS: [PlaylistTier; 2] = [PlaylistTier::Search, PlaylistTier::KnownPlaylists];

const LAST_RESORT: [(&str, &str); 2] = [
    ("37i9dQZF1DXcBWIGoYBM5M", "Today's Top Hits"),
    ("37i9dQZF1DX3rxVfibe1L0", "Mood Booster"),
];

#[derive(Default)]
struct SearchOutcome {
    playlists: Vec<Playlist>,
    /// Search calls that returned successfully, valid items or not.
    answered: usize,
    last_error: Option<SpotifyError>,
}

pub struct PlaylistResolver {
    service: Arc<dyn MusicService>,
    rng: Mutex<StdRng>,
}

impl PlaylistResolver {
    pub fn new(service: Arc<dyn MusicService>) -> Self {
        Self::with_rng(service, StdRng::from_entropy())
    }

    /// Resolver with a fixed random source, for reproducible ordering.
    pub fn with_rng(service: Arc<dyn MusicService>, rng: StdRng) -> Self {
        Self {
            service,
            rng: Mutex::new(rng),
        }
    }

    /// Between 1 and [`MAX_PLAYLISTS`] playlists with unique ids. Never fails:
    /// when no upstream call answers, the result is [`last_resort_playlists`].
    pub async fn resolve(&self, session: &Session, mood: MoodLabel) -> Vec<Playlist> {
        match self.try_resolve(session, mood).await {
            Ok(playlists) => playlists,
            Err(e) => {
                tracing::error!("Playlist lookup for {} failed, using fallback: {}", mood, e);
                last_resort_playlists()
            }
        }
    }

    async fn try_resolve(&self, session: &Session, mood: MoodLabel) -> SpotifyResult<Vec<Playlist>> {
        let token = session.refresh(self.service.as_ref()).await;
        let (genres, genres_answered) = match self.user_genres(&token).await {
            Ok(genres) => (genres, true),
            Err(e) => {
                tracing::warn!("Could not fetch top artist genres: {}", e);
                (Vec::new(), false)
            }
        };

        let mut terms = search_terms(mood.profile(), &genres);
        self.shuffle(&mut terms);
        terms.truncate(PLAYLIST_SEARCH_TERMS);

        let mut collected = Collected::new();
        for tier in PLAYLIST_TIERS {
            if collected.len() > MIN_PLAYLISTS {
                break;
            }

            let found = match tier {
                PlaylistTier::Search => {
                    let outcome = self.search(&token, &terms).await;
                    match outcome.last_error {
                        // Nothing upstream answered at all.
                        Some(e) if outcome.answered == 0 && !genres_answered => return Err(e),
                        _ => outcome.playlists,
                    }
                }
                PlaylistTier::KnownPlaylists => known_playlists(mood),
            };
            let added = collected.extend(found);
            tracing::info!("Tier {} for {}: {} playlists", tier.as_str(), mood, added);
        }

        let mut playlists = collected.into_vec();
        self.shuffle(&mut playlists);
        playlists.truncate(MAX_PLAYLISTS);
        Ok(playlists)
    }

    /// Searches every term. A failing term is logged and contributes nothing.
    async fn search(&self, token: &str, terms: &[String]) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        for term in terms {
            match self
                .service
                .search_playlists(token, term, PLAYLISTS_PER_TERM)
                .await
            {
                Ok(items) => {
                    outcome.answered += 1;
                    let before = outcome.playlists.len();
                    outcome
                        .playlists
                        .extend(items.into_iter().flatten().filter_map(PlaylistItem::validate));
                    tracing::debug!(
                        "Search term {:?}: {} valid playlists",
                        term,
                        outcome.playlists.len() - before
                    );
                }
                Err(e) => {
                    tracing::warn!("Playlist search for {:?} failed: {}", term, e);
                    outcome.last_error = Some(e);
                }
            }
        }
        outcome
    }

    /// Genres of the user's top artists, first occurrence order.
    async fn user_genres(&self, token: &str) -> SpotifyResult<Vec<String>> {
        let artists = self
            .service
            .top_artists(token, TimeRange::Medium, GENRE_ARTIST_LIMIT)
            .await?;

        let mut genres: Vec<String> = Vec::new();
        for genre in artists.into_iter().flat_map(|a| a.genres) {
            if !genres.contains(&genre) {
                genres.push(genre);
            }
        }
        Ok(genres)
    }

    fn shuffle<T>(&self, items: &mut [T]) {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        items.shuffle(&mut *rng);
    }
}

/// All ranked mood keywords followed by up to [`GENRE_COMBINATIONS`]
/// "{genre} {primary keyword}" terms.
pub fn search_terms(profile: &MoodProfile, genres: &[String]) -> Vec<String> {
    let primary = profile.primary_keyword();
    profile
        .keywords
        .iter()
        .map(|k| k.to_string())
        .chain(
            genres
                .iter()
                .take(GENRE_COMBINATIONS)
                .map(|genre| format!("{} {}", genre, primary)),
        )
        .collect()
}

pub fn known_playlists(mood: MoodLabel) -> Vec<Playlist> {
    mood.profile()
        .fallback_playlists
        .iter()
        .enumerate()
        .map(|(i, id)| Playlist::known(id, format!("{} Mix {}", mood.display_name(), i + 1)))
        .collect()
}

pub fn last_resort_playlists() -> Vec<Playlist> {
    LAST_RESORT
        .iter()
        .map(|(id, name)| Playlist::known(id, name.to_string()))
        .collect()
}

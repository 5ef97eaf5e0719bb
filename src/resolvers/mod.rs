mod playlists;
mod recommendations;


use std::collections::HashSet;
use thiserror::Error;

use crate::models::{MoodLabel, Playlist, Track, UnknownMood};

pub use playlists::{
    known_playlists, last_resort_playlists, search_terms, PlaylistResolver, PlaylistTier,
    PLAYLIST_TIERS,
};
pub use recommendations::{
    RecommendationResolver, RecommendationTier, SeedSet, RECOMMENDATION_TIERS,
};

/// Tier A must yield at least this many tracks for the search tier to be skipped.
pub const MIN_RECOMMENDATION_TRACKS: usize = 5;
pub const MAX_RECOMMENDATION_TRACKS: usize = 10;
pub const SEED_ARTIST_LIMIT: u32 = 2;
pub const SEED_TRACK_LIMIT: u32 = 3;
pub const TRACK_SEARCH_LIMIT: u32 = 15;
/// Number of ranked mood keywords combined into the track search query.
pub const TRACK_SEARCH_KEYWORDS: usize = 2;

/// The search tier is satisfied with strictly more playlists than this.
pub const MIN_PLAYLISTS: usize = 0;
pub const MAX_PLAYLISTS: usize = 8;
pub const PLAYLIST_SEARCH_TERMS: usize = 3;
pub const PLAYLISTS_PER_TERM: u32 = 3;
pub const GENRE_ARTIST_LIMIT: u32 = 10;
pub const GENRE_COMBINATIONS: usize = 3;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidMood(#[from] UnknownMood),

    #[error("no tracks found for mood {mood}")]
    NoTracks {
        mood: MoodLabel,
        /// Error of the last tier that failed, if any.
        details: Option<String>,
    },
}

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Track {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Playlist {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Results accumulated across tiers, deduplicated by id. The first
/// occurrence of an id wins and insertion order is kept.
#[derive(Debug)]
pub struct Collected<T> {
    items: Vec<T>,
    seen: HashSet<String>,
    cap: Option<usize>,
}

impl<T: Identified> Default for Collected<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified> Collected<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            cap: None,
        }
    }

    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap: Some(cap),
            ..Self::new()
        }
    }

    /// Adds unseen items until the cap is reached; returns how many were added.
    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        let mut added = 0;
        for item in items {
            if self.is_full() {
                break;
            }
            if self.seen.insert(item.id().to_string()) {
                self.items.push(item);
                added += 1;
            }
        }
        added
    }

    pub fn is_full(&self) -> bool {
        self.cap.is_some_and(|cap| self.items.len() >= cap)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

pub mod mood;
pub mod playlist;
pub mod track;

pub use mood::{AudioFeature, FeatureBound, FeatureTarget, MoodLabel, MoodProfile, UnknownMood};
pub use playlist::{Owner, Playlist, PlaylistItem};
pub use track::{Album, ArtistRef, ExternalUrls, Image, Track};

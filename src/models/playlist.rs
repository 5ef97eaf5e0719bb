use serde::{Deserialize, Serialize};

use super::track::{ExternalUrls, Image};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";
pub const SPOTIFY_OWNER: &str = "Spotify";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: Owner,
    pub images: Vec<Image>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Playlist {
    /// Minimal record for a playlist known only by id.
    pub fn known(id: &str, name: String) -> Self {
        Self {
            id: id.to_string(),
            name,
            owner: Owner {
                display_name: Some(SPOTIFY_OWNER.to_string()),
            },
            images: vec![Image {
                url: PLACEHOLDER_IMAGE.to_string(),
            }],
            external_urls: ExternalUrls {
                spotify: Some(format!("https://open.spotify.com/playlist/{}", id)),
            },
        }
    }
}

/// Playlist item as it comes out of a search; any field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

impl PlaylistItem {
    /// Returns a playlist only when id, name and external URL are all present.
    pub fn validate(self) -> Option<Playlist> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let name = self.name.filter(|name| !name.is_empty())?;
        let url = self
            .external_urls
            .and_then(|urls| urls.spotify)
            .filter(|url| !url.is_empty())?;

        Some(Playlist {
            id,
            name,
            owner: self.owner.unwrap_or_default(),
            images: self.images.unwrap_or_default(),
            external_urls: ExternalUrls { spotify: Some(url) },
        })
    }
}

use serde::{Deserialize, Serialize};

/// Track as returned by the music service. Serialized back to the front end
/// in the same shape it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

impl Track {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            artists: Vec::new(),
            album: Album::default(),
            external_urls: ExternalUrls::default(),
            preview_url: None,
        }
    }

    pub fn with_artist(mut self, id: String, name: String) -> Self {
        self.artists.push(ArtistRef { id, name });
        self
    }

    pub fn with_image(mut self, url: String) -> Self {
        self.album.images.push(Image { url });
        self
    }

    pub fn with_external_url(mut self, url: String) -> Self {
        self.external_urls.spotify = Some(url);
        self
    }
}

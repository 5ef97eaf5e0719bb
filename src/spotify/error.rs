use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Spotify API returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Spotify client credentials are not configured")]
    MissingCredentials,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

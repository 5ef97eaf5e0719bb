pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/callback";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_MARKET: &str = "US";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Missing id is not fatal here; `/login` reports it.
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub port: u16,
    pub static_dir: String,
    pub default_market: String,
    pub api_url: String,
    pub accounts_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            port: DEFAULT_PORT,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
            default_market: DEFAULT_MARKET.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            client_id: get("SPOTIFY_CLIENT_ID"),
            client_secret: get("SPOTIFY_CLIENT_SECRET"),
            redirect_uri: get("REDIRECT_URI").unwrap_or(defaults.redirect_uri),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: get("STATIC_DIR").unwrap_or(defaults.static_dir),
            default_market: get("DEFAULT_MARKET").unwrap_or(defaults.default_market),
            api_url: get("SPOTIFY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            accounts_url: get("SPOTIFY_ACCOUNTS_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.accounts_url),
        }
    }
}

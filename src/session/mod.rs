use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::spotify::{MusicService, TokenGrant, TokenPair};

/// Token pair of the one authenticated user this process serves.
///
/// Refreshes are serialized: a caller that had to wait for another caller's
/// refresh reuses its result instead of refreshing again.
#[derive(Default)]
pub struct Session {
    tokens: Mutex<Option<TokenPair>>,
    /// Bumped on every stored grant or completed refresh attempt.
    generation: AtomicU64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the pair from an authorization-code grant, replacing any
    /// existing one.
    pub async fn set_from_grant(&self, grant: TokenGrant) {
        let mut tokens = self.tokens.lock().await;
        *tokens = Some(TokenPair {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token.unwrap_or_default(),
            obtained_at: Utc::now(),
        });
        self.generation.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Stored new token pair");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.lock().await.is_some()
    }

    pub async fn obtained_at(&self) -> Option<DateTime<Utc>> {
        self.tokens.lock().await.as_ref().map(|t| t.obtained_at)
    }

    #[cfg(test)]
    pub(crate) async fn access_token(&self) -> Option<String> {
        self.tokens
            .lock()
            .await
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Best-effort refresh. Returns the access token to use, which is the
    /// previous (possibly expired) one when the refresh fails, or an empty
    /// string when nobody has logged in yet.
    pub async fn refresh(&self, service: &dyn MusicService) -> String {
        let seen = self.generation.load(Ordering::SeqCst);
        let mut tokens = self.tokens.lock().await;

        let Some(pair) = tokens.as_mut() else {
            tracing::warn!("No token pair stored, continuing unauthenticated");
            return String::new();
        };

        if self.generation.load(Ordering::SeqCst) != seen {
            tracing::debug!("Token refreshed while waiting, reusing it");
            return pair.access_token.clone();
        }

        if pair.refresh_token.is_empty() {
            tracing::warn!("No refresh token stored, using current access token");
            return pair.access_token.clone();
        }

        match service.refresh_access_token(&pair.refresh_token).await {
            Ok(grant) => {
                pair.access_token = grant.access_token;
                if let Some(refresh_token) = grant.refresh_token {
                    pair.refresh_token = refresh_token;
                }
                pair.obtained_at = Utc::now();
                tracing::debug!("Access token refreshed");
            }
            Err(e) => {
                tracing::warn!("Could not refresh access token: {}", e);
            }
        }
        self.generation.fetch_add(1, Ordering::SeqCst);

        pair.access_token.clone()
    }
}

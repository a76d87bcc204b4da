use crate::ampache::models::{Album, Artist, Preference};
use crate::ampache::query::{SearchQuery, StatsQuery};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error (code {code}): {message}")]
    Server { code: u32, message: String },
    #[error("unexpected response format: {0}")]
    Parse(String),
    #[error("not authenticated")]
    NotAuthenticated,
}

/// The remote procedures this crate calls on an Ampache server.
///
/// `AmpacheClient` talks to a real server; tests substitute a recording fake.
/// Errors are returned as-is to callers of the query builders.
#[async_trait]
pub trait AmpacheApi: Send + Sync {
    /// Rule-based search (`advanced_search`)
    async fn advanced_search(&self, query: &SearchQuery) -> Result<Vec<Artist>, ApiError>;

    /// Named-filter browsing (`stats`)
    async fn stats(&self, query: &StatsQuery) -> Result<Vec<Artist>, ApiError>;

    /// Single artist, `filter` is the artist id
    async fn artist(&self, filter: &str) -> Result<Artist, ApiError>;

    /// Every album associated with the artist, owned or not
    async fn artist_albums(&self, filter: &str) -> Result<Vec<Album>, ApiError>;

    async fn system_preferences(&self) -> Result<Vec<Preference>, ApiError>;

    async fn user_preferences(&self) -> Result<Vec<Preference>, ApiError>;
}

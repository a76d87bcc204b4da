#![allow(dead_code)]
use ample_core::ampache::{
    AmpacheApi, ApiError, Album, Artist, Preference, SearchQuery, StatsQuery,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Mutex;

/// Initialize tracing for tests
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

/// One call made against `FakeApi`, with the descriptor as serialized JSON
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AdvancedSearch(Value),
    Stats(Value),
    Artist(String),
    ArtistAlbums(String),
    SystemPreferences,
    UserPreferences,
}

/// Records every call and answers from canned data.
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    pub listing: Vec<Artist>,
    pub artist: Option<Artist>,
    pub albums: Vec<Album>,
    pub system_preferences: Vec<Preference>,
    pub user_preferences: Vec<Preference>,
    pub fail_listing: bool,
    pub fail_system_preferences: bool,
    pub fail_user_preferences: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The only call made, panicking if there was not exactly one
    pub fn single_call(&self) -> Call {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn server_error(message: &str) -> ApiError {
    ApiError::Server {
        code: 4700,
        message: message.to_string(),
    }
}

#[async_trait]
impl AmpacheApi for FakeApi {
    async fn advanced_search(&self, query: &SearchQuery) -> Result<Vec<Artist>, ApiError> {
        self.record(Call::AdvancedSearch(serde_json::to_value(query).unwrap()));
        if self.fail_listing {
            return Err(server_error("search failed"));
        }
        Ok(self.listing.clone())
    }

    async fn stats(&self, query: &StatsQuery) -> Result<Vec<Artist>, ApiError> {
        self.record(Call::Stats(serde_json::to_value(query).unwrap()));
        if self.fail_listing {
            return Err(server_error("stats failed"));
        }
        Ok(self.listing.clone())
    }

    async fn artist(&self, filter: &str) -> Result<Artist, ApiError> {
        self.record(Call::Artist(filter.to_string()));
        self.artist
            .clone()
            .ok_or_else(|| server_error("artist not found"))
    }

    async fn artist_albums(&self, filter: &str) -> Result<Vec<Album>, ApiError> {
        self.record(Call::ArtistAlbums(filter.to_string()));
        Ok(self.albums.clone())
    }

    async fn system_preferences(&self) -> Result<Vec<Preference>, ApiError> {
        self.record(Call::SystemPreferences);
        if self.fail_system_preferences {
            return Err(server_error("system preferences unavailable"));
        }
        Ok(self.system_preferences.clone())
    }

    async fn user_preferences(&self) -> Result<Vec<Preference>, ApiError> {
        self.record(Call::UserPreferences);
        if self.fail_user_preferences {
            return Err(server_error("user preferences unavailable"));
        }
        Ok(self.user_preferences.clone())
    }
}

pub fn make_artist(id: &str, name: &str, albumcount: i64) -> Artist {
    serde_json::from_value(json!({"id": id, "name": name, "albumcount": albumcount})).unwrap()
}

pub fn make_albums(count: usize) -> Vec<Album> {
    (0..count)
        .map(|i| {
            serde_json::from_value(json!({"id": format!("al{i}"), "name": format!("Album {i}")}))
                .unwrap()
        })
        .collect()
}

pub fn make_preference(name: &str, value: Value) -> Preference {
    serde_json::from_value(json!({"name": name, "value": value})).unwrap()
}

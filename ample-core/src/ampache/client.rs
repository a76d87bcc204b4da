use crate::ampache::api::{AmpacheApi, ApiError};
use crate::ampache::models::{Album, Artist, Preference};
use crate::ampache::query::{SearchQuery, StatsQuery};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const API_VERSION: &str = "6.0.0";
const ENDPOINT: &str = "/server/json.server.php";
/// Server error code for an expired or unknown session token
const SESSION_EXPIRED: u32 = 4701;

/// How the client authenticates against the server
#[derive(Clone)]
pub enum Credentials {
    /// Static API key, sent as `auth` on every call
    ApiKey(String),
    /// Username and password, exchanged for a session token by `handshake`
    Password { username: String, password: String },
}

impl Credentials {
    /// Value stored in the `LastLoginMethod` setting
    pub fn login_method(&self) -> &'static str {
        match self {
            Credentials::ApiKey(_) => "apikey",
            Credentials::Password { .. } => "password",
        }
    }
}

/// A client for the Ampache JSON API.
pub struct AmpacheClient {
    server_url: String,
    credentials: Credentials,
    session: RwLock<Option<String>>,
    http: reqwest::Client,
}

impl AmpacheClient {
    pub fn new(server_url: String, credentials: Credentials) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            credentials,
            session: RwLock::new(None),
            http: reqwest::Client::new(),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.server_url, ENDPOINT)
    }

    /// Exchange credentials for a session token and cache it.
    ///
    /// With an API key there is nothing to exchange; the key is the token.
    pub async fn handshake(&self) -> Result<String, ApiError> {
        let token = match &self.credentials {
            Credentials::ApiKey(key) => key.clone(),
            Credentials::Password { username, password } => {
                let timestamp = chrono::Utc::now().timestamp();
                let params = vec![
                    ("action".to_string(), "handshake".to_string()),
                    (
                        "auth".to_string(),
                        handshake_passphrase(password, timestamp),
                    ),
                    ("timestamp".to_string(), timestamp.to_string()),
                    ("version".to_string(), API_VERSION.to_string()),
                    ("user".to_string(), username.clone()),
                ];
                let data = self.send(&params).await?;
                let token = data
                    .get("auth")
                    .and_then(|a| a.as_str())
                    .ok_or_else(|| ApiError::Parse("handshake response has no auth".into()))?
                    .to_string();
                info!("Ampache handshake succeeded for {}", username);
                token
            }
        };

        *self.session.write().await = Some(token.clone());
        Ok(token)
    }

    async fn auth_token(&self) -> Result<String, ApiError> {
        if let Some(token) = self.session.read().await.as_ref() {
            return Ok(token.clone());
        }
        self.handshake().await
    }

    /// Run an authenticated action and return the response body.
    async fn call(&self, action: &str, extra: Vec<(String, String)>) -> Result<Value, ApiError> {
        let token = self.auth_token().await?;
        let mut params = vec![
            ("action".to_string(), action.to_string()),
            ("auth".to_string(), token),
        ];
        params.extend(extra);

        debug!("Ampache {}", action);
        let result = self.send(&params).await;

        if let Err(ApiError::Server { code, .. }) = &result {
            if *code == SESSION_EXPIRED {
                warn!("Ampache session expired, next call will handshake again");
                self.session.write().await.take();
            }
        }
        result
    }

    async fn send(&self, params: &[(String, String)]) -> Result<Value, ApiError> {
        let resp = self
            .http
            .get(self.endpoint())
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        let body: Value = resp.json().await?;
        parse_envelope(body)
    }

    /// Check the server is reachable and the session is valid.
    pub async fn ping(&self) -> Result<Value, ApiError> {
        self.call("ping", Vec::new()).await
    }
}

#[async_trait]
impl AmpacheApi for AmpacheClient {
    async fn advanced_search(&self, query: &SearchQuery) -> Result<Vec<Artist>, ApiError> {
        let data = self.call("advanced_search", query.to_params()).await?;
        list_from(data, query.object_type)
    }

    async fn stats(&self, query: &StatsQuery) -> Result<Vec<Artist>, ApiError> {
        let data = self.call("stats", query.to_params()).await?;
        list_from(data, query.object_type)
    }

    async fn artist(&self, filter: &str) -> Result<Artist, ApiError> {
        let data = self
            .call("artist", vec![("filter".to_string(), filter.to_string())])
            .await?;
        single_from(data, "artist")
    }

    async fn artist_albums(&self, filter: &str) -> Result<Vec<Album>, ApiError> {
        let data = self
            .call(
                "artist_albums",
                vec![("filter".to_string(), filter.to_string())],
            )
            .await?;
        list_from(data, "album")
    }

    async fn system_preferences(&self) -> Result<Vec<Preference>, ApiError> {
        let data = self.call("system_preferences", Vec::new()).await?;
        list_from(data, "preference")
    }

    async fn user_preferences(&self) -> Result<Vec<Preference>, ApiError> {
        let data = self.call("user_preferences", Vec::new()).await?;
        list_from(data, "preference")
    }
}

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// `sha256(timestamp + sha256(password))`, hex encoded.
pub fn handshake_passphrase(password: &str, timestamp: i64) -> String {
    sha256_hex(&format!("{}{}", timestamp, sha256_hex(password)))
}

/// Turn an `{"error": {...}}` body into `ApiError::Server`, pass anything else through.
fn parse_envelope(body: Value) -> Result<Value, ApiError> {
    let Some(error) = body.get("error") else {
        return Ok(body);
    };

    // Ampache 5+ uses errorCode/errorMessage, older servers code/message
    let code = error
        .get("errorCode")
        .or_else(|| error.get("code"))
        .and_then(|c| match c {
            Value::String(s) => s.parse::<u32>().ok(),
            Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            _ => None,
        })
        .unwrap_or(0);
    let message = error
        .get("errorMessage")
        .or_else(|| error.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown error")
        .to_string();

    Err(ApiError::Server { code, message })
}

/// List payloads come wrapped in their object type (`{"artist": [...]}`).
/// A missing wrapper means an empty list.
fn list_from<T: DeserializeOwned>(data: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let items = match data {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(ApiError::Parse(format!(
                    "expected list under \"{key}\", got {other}"
                )))
            }
            None => Vec::new(),
        },
        other => return Err(ApiError::Parse(format!("expected object, got {other}"))),
    };

    items
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(|e| ApiError::Parse(e.to_string())))
        .collect()
}

/// Single-object payloads are either the object itself or a one-element list
/// under the object type.
fn single_from<T: DeserializeOwned>(data: Value, key: &str) -> Result<T, ApiError> {
    let value = if data.get("id").is_some() {
        data
    } else {
        data.get(key)
            .and_then(|v| match v {
                Value::Array(items) => items.first().cloned(),
                Value::Object(_) => Some(v.clone()),
                _ => None,
            })
            .ok_or_else(|| ApiError::Parse(format!("no \"{key}\" in response")))?
    };
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

use crate::ampache::Credentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// YAML config file structure for non-secret settings.
///
/// Passwords and API keys are only ever read from the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigYaml {
    pub server_url: Option<String>,
    pub username: Option<String>,
    /// Where `ample-settings.json` lives. Defaults to the config directory.
    pub settings_dir: Option<PathBuf>,
}

/// Connection and storage configuration for a client session
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub settings_dir: PathBuf,
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

/// `~/.ample`, or `.ample` in the working directory without a home directory
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".ample"))
        .unwrap_or_else(|| PathBuf::from(".ample"))
}

impl ClientConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let dev_mode = std::env::var("AMPLE_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok();
        if dev_mode {
            info!("Dev mode activated - loading from .env");
            Ok(Self::from_env())
        } else {
            info!("Loading from config.yaml");
            Self::load_from_dir(&default_config_dir())
        }
    }

    fn from_env() -> Self {
        Self {
            server_url: env_non_empty("AMPLE_SERVER"),
            username: env_non_empty("AMPLE_USER"),
            password: env_non_empty("AMPLE_PASSWORD"),
            api_key: env_non_empty("AMPLE_API_KEY"),
            settings_dir: env_non_empty("AMPLE_SETTINGS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_config_dir),
        }
    }

    /// Read `config.yaml` from `dir`; a missing file means an empty config.
    /// Secrets still come from the environment.
    fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join("config.yaml");
        let yaml = match std::fs::read_to_string(&config_path) {
            Ok(content) => serde_yaml::from_str::<ConfigYaml>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config.yaml at {}", config_path.display());
                ConfigYaml::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            server_url: yaml.server_url,
            username: yaml.username,
            password: env_non_empty("AMPLE_PASSWORD"),
            api_key: env_non_empty("AMPLE_API_KEY"),
            settings_dir: yaml.settings_dir.unwrap_or_else(|| dir.to_path_buf()),
        })
    }

    pub fn save_to_config_yaml(&self, dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(dir)?;
        let yaml = ConfigYaml {
            server_url: self.server_url.clone(),
            username: self.username.clone(),
            settings_dir: Some(self.settings_dir.clone()),
        };
        std::fs::write(dir.join("config.yaml"), serde_yaml::to_string(&yaml)?)?;
        Ok(())
    }

    pub fn server_url(&self) -> Result<&str, ConfigError> {
        self.server_url
            .as_deref()
            .ok_or(ConfigError::Missing("server URL"))
    }

    /// API key if one is configured, otherwise username and password.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        if let Some(key) = &self.api_key {
            return Ok(Credentials::ApiKey(key.clone()));
        }
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Ok(Credentials::Password {
                username: username.clone(),
                password: password.clone(),
            }),
            (None, _) => Err(ConfigError::Missing("username or API key")),
            (Some(_), None) => Err(ConfigError::Missing("password")),
        }
    }
}

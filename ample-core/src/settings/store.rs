//! Persisted settings store
use crate::reactive::Reactive;
use crate::settings::merge::merge_defaults;
use crate::settings::model::Settings;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

/// Key the settings tree is persisted under
pub const SETTINGS_KEY: &str = "ample-settings";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value persistence for settings
pub trait SettingsBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SettingsBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory backend for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend.put(key, value);
        backend
    }

    fn put(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.put(key, value);
        Ok(())
    }
}

/// Resolve a persisted settings string against the defaults.
///
/// Unparseable input yields the defaults. A stored leaf of the wrong type
/// falls back to its own default without touching the rest.
pub fn resolve_settings(raw: &str) -> Settings {
    let stored: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Persisted settings are not valid JSON, using defaults: {}", e);
            return Settings::default();
        }
    };

    let defaults = match serde_json::to_value(Settings::default()) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to serialize default settings: {}", e);
            return Settings::default();
        }
    };

    let merged = merge_defaults(defaults.clone(), stored);
    match serde_json::from_value(merged.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Persisted settings do not match the settings shape: {}", e);
            keep_valid_leaves(defaults, merged)
        }
    }
}

/// Rebuild the tree from the defaults one stored leaf at a time. A leaf the
/// typed tree rejects keeps its default; every other stored value survives.
fn keep_valid_leaves(defaults: Value, merged: Value) -> Settings {
    let mut leaves = Vec::new();
    collect_leaves(&defaults, merged, &mut Vec::new(), &mut leaves);

    let mut accepted = defaults;
    for (path, value) in leaves {
        let Some((key, parents)) = path.split_last() else {
            continue;
        };
        let Some(parent) = object_at(&mut accepted, parents) else {
            continue;
        };
        let previous = parent.insert(key.clone(), value);

        if serde_json::from_value::<Settings>(accepted.clone()).is_err() {
            warn!("Ignoring persisted setting {}, keeping its default", path.join("."));
            if let Some(parent) = object_at(&mut accepted, parents) {
                match previous {
                    Some(default_value) => parent.insert(key.clone(), default_value),
                    None => parent.remove(key),
                };
            }
        }
    }

    serde_json::from_value(accepted).unwrap_or_default()
}

/// Stored values paired with their key paths. Recursion follows the
/// objects of the default tree; anything else is one leaf.
fn collect_leaves(
    defaults: &Value,
    stored: Value,
    path: &mut Vec<String>,
    out: &mut Vec<(Vec<String>, Value)>,
) {
    match (defaults, stored) {
        (Value::Object(defaults), Value::Object(stored)) => {
            for (key, value) in stored {
                let default_value = defaults.get(&key).cloned().unwrap_or(Value::Null);
                path.push(key);
                collect_leaves(&default_value, value, path, out);
                path.pop();
            }
        }
        (_, stored) => out.push((path.clone(), stored)),
    }
}

fn object_at<'a>(root: &'a mut Value, path: &[String]) -> Option<&'a mut Map<String, Value>> {
    let mut node = root;
    for key in path {
        node = node.get_mut(key.as_str())?;
    }
    node.as_object_mut()
}

/// The session's settings tree, kept in a reactive container and written back
/// to its backend on every change.
#[derive(Clone)]
pub struct SettingsStore {
    backend: Arc<dyn SettingsBackend>,
    state: Reactive<Settings>,
}

impl SettingsStore {
    /// Load settings from `backend`, layering stored values over defaults.
    ///
    /// On first use nothing is stored yet; the defaults are written out.
    pub fn load(backend: Arc<dyn SettingsBackend>) -> Result<Self, SettingsError> {
        let settings = match backend.read(SETTINGS_KEY)? {
            Some(raw) => {
                info!("Loaded persisted settings");
                resolve_settings(&raw)
            }
            None => {
                info!("No persisted settings, starting from defaults");
                let settings = Settings::default();
                backend.write(SETTINGS_KEY, &serde_json::to_string(&settings)?)?;
                settings
            }
        };

        Ok(Self {
            backend,
            state: Reactive::new(settings),
        })
    }

    pub fn get(&self) -> Settings {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.state.subscribe()
    }

    /// Current language, if set and non-empty
    pub fn language(&self) -> Option<String> {
        self.state
            .with(|s| s.active_language().map(|lang| lang.to_string()))
    }

    /// Mutate the settings in place and persist the result.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<(), SettingsError> {
        self.state.update(f);
        self.persist()
    }

    pub fn set(&self, settings: Settings) -> Result<(), SettingsError> {
        self.state.set(settings);
        self.persist()
    }

    /// Back to the default tree, persisted.
    pub fn reset(&self) -> Result<(), SettingsError> {
        info!("Resetting settings to defaults");
        self.set(Settings::default())
    }

    fn persist(&self) -> Result<(), SettingsError> {
        let json = self.state.with(|settings| serde_json::to_string(settings))?;
        self.backend.write(SETTINGS_KEY, &json)
    }
}

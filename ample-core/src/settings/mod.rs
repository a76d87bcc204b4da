//! User settings: the default tree, the merge that layers stored values over
//! it, and the persisted store.

pub mod merge;
pub mod model;
pub mod store;

pub use merge::merge_defaults;
pub use model::*;
pub use store::{
    resolve_settings, FileBackend, MemoryBackend, SettingsBackend, SettingsError, SettingsStore,
    SETTINGS_KEY,
};

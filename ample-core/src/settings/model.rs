//! The persisted settings tree.
//!
//! Key names match the JSON written by the web player so a settings value can
//! be shared between the two.

use ample_common::RepeatState;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub sidebar_is_open: bool,
    pub queue_is_open: bool,
    pub queue_is_pinned: bool,
    /// 0-100
    pub player_volume: u32,
    pub player_is_open: bool,
    pub player_is_mini: bool,
    pub repeat_state: RepeatState,
    pub volume_normalization_enabled: bool,
    pub dynamics_compressor_enabled: bool,
    /// UI language code; `None` leaves the locale alone
    pub language: Option<String>,
    pub skip_below: SkipBelow,
    /// "show" or "hide"
    pub show_songs_by_other_artists: String,
    /// "include" or "exclude"
    pub play_songs_by_other_artists: String,
    pub last_session: Map<String, Value>,
    pub last_login_method: Option<String>,
    pub queue_refill: QueueRefill,
    pub artist_releases: ArtistReleases,
    pub theme: Theme,
    pub notifications: Notifications,
    pub music_brainz_filters: MusicBrainzFilters,
    /// Keys written by other clients, kept so saving does not drop them
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sidebar_is_open: true,
            queue_is_open: true,
            queue_is_pinned: true,
            player_volume: 50,
            player_is_open: true,
            player_is_mini: false,
            repeat_state: RepeatState::Disabled,
            volume_normalization_enabled: true,
            dynamics_compressor_enabled: false,
            language: Some("en".to_string()),
            skip_below: SkipBelow::default(),
            show_songs_by_other_artists: "show".to_string(),
            play_songs_by_other_artists: "include".to_string(),
            last_session: Map::new(),
            last_login_method: None,
            queue_refill: QueueRefill::default(),
            artist_releases: ArtistReleases::default(),
            theme: Theme::default(),
            notifications: Notifications::default(),
            music_brainz_filters: MusicBrainzFilters::default(),
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// The language to apply, if one is set.
    pub fn active_language(&self) -> Option<&str> {
        self.language.as_deref().filter(|lang| !lang.is_empty())
    }
}

/// Skip tracks rated below a threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkipBelow {
    pub enabled: bool,
    pub rating: String,
    /// Whether unrated (0) tracks still play
    pub allow_zero: bool,
}

impl Default for SkipBelow {
    fn default() -> Self {
        Self {
            enabled: false,
            rating: "3".to_string(),
            allow_zero: true,
        }
    }
}

/// Refill the queue when it runs dry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueRefill {
    pub enabled: bool,
    pub mode: String,
    pub smartlist: Option<Value>,
}

impl Default for QueueRefill {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: "smartlist".to_string(),
            smartlist: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtistReleases {
    pub view: String,
    pub sort: String,
    pub group: String,
    pub sort_reversed: bool,
}

impl Default for ArtistReleases {
    fn default() -> Self {
        Self {
            view: "expanded_columns".to_string(),
            sort: "year".to_string(),
            group: "release_type".to_string(),
            sort_reversed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    /// "light", "dark", or `None` to follow the system
    pub mode: Option<String>,
    pub hue_background: u16,
    pub hue1: u16,
    pub hue2: u16,
    pub color_wave: String,
    pub is_gray: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: None,
            hue_background: 60,
            hue1: 60,
            hue2: 60,
            color_wave: "hsl(30, 70%, 50%)".to_string(),
            is_gray: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationToggle {
    pub is_enabled: bool,
    pub is_silent: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Notifications {
    pub gain_tags_missing: NotificationToggle,
    pub rating_missing: NotificationToggle,
    pub alternate_versions: NotificationToggle,
    pub lyrics_missing: NotificationToggle,
    pub lyrics_not_timestamped: NotificationToggle,
}

/// Which MusicBrainz comparison rows to hide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MusicBrainzFilters {
    pub hide_matches: bool,
    pub hide_duplicates: bool,
    pub hide_issues: bool,
    pub hide_flagged: bool,
    pub hide_missing: bool,
    pub hide_infos: bool,
    pub hide_videos: bool,
    pub hide_remixes: bool,
    pub hide_live: bool,
    pub hide_instrumentals: bool,
    pub hide_demos: bool,
    pub hide_interviews: bool,
    pub hide_zero_times: bool,
    pub hide_short_songs: bool,
    pub hide_radio_edits: bool,
}

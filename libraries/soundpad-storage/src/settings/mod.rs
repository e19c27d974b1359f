//! User settings management
//!
//! Player settings are one JSON record (`playerSettings`); the theme and
//! view mode are plain strings under their own keys, matching what older
//! releases wrote.

use serde::{Deserialize, Serialize};
use soundpad_core::storage::{keys, load_record, save_record};
use soundpad_core::{DurableStore, Result};
use std::fmt;
use std::str::FromStr;

/// Default output volume (80%)
pub const DEFAULT_VOLUME: f64 = 0.8;

/// Default theme name
pub const DEFAULT_THEME: &str = "dark";

/// `{ volume, theme, autostart }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Saved volume in `[0, 1]`
    pub volume: f64,
    /// Theme name
    pub theme: String,
    /// Launch at login
    pub autostart: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
            theme: DEFAULT_THEME.to_string(),
            autostart: false,
        }
    }
}

/// Track list layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Tiles
    #[default]
    Grid,
    /// Rows
    List,
}

impl ViewMode {
    /// Stored string form
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

/// Load player settings; missing or corrupt records yield defaults
///
/// The volume is clamped into `[0, 1]` on the way in.
pub async fn load_player_settings(store: &dyn DurableStore) -> Result<PlayerSettings> {
    let mut settings: PlayerSettings = load_record(store, keys::PLAYER_SETTINGS)
        .await?
        .unwrap_or_default();
    if !settings.volume.is_finite() {
        settings.volume = DEFAULT_VOLUME;
    }
    settings.volume = settings.volume.clamp(0.0, 1.0);
    Ok(settings)
}

/// Save player settings
pub async fn save_player_settings(store: &dyn DurableStore, settings: &PlayerSettings) -> Result<()> {
    save_record(store, keys::PLAYER_SETTINGS, settings).await
}

/// Persist only the volume, keeping the other player settings
pub async fn save_volume(store: &dyn DurableStore, volume: f64) -> Result<()> {
    let mut settings = load_player_settings(store).await?;
    settings.volume = volume.clamp(0.0, 1.0);
    save_player_settings(store, &settings).await
}

/// Selected theme, defaulting to `dark`
pub async fn theme(store: &dyn DurableStore) -> Result<String> {
    Ok(store
        .get(keys::SELECTED_THEME)
        .await?
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_THEME.to_string()))
}

/// Store the selected theme
pub async fn set_theme(store: &dyn DurableStore, theme: &str) -> Result<()> {
    store.set(keys::SELECTED_THEME, theme.to_string()).await
}

/// Current view mode; unknown values read as the default
pub async fn view_mode(store: &dyn DurableStore) -> Result<ViewMode> {
    Ok(store
        .get(keys::VIEW_MODE)
        .await?
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default())
}

/// Store the view mode
pub async fn set_view_mode(store: &dyn DurableStore, mode: ViewMode) -> Result<()> {
    store.set(keys::VIEW_MODE, mode.as_str().to_string()).await
}

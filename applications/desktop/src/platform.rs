//! Platform collaborators
//!
//! File dialogs and login autostart belong to the windowing toolkit. The
//! core only sees these traits; headless builds and tests use the
//! implementations below.

use async_trait::async_trait;
use soundpad_core::{DurableStore, Result};
use soundpad_storage::settings;
use std::path::PathBuf;
use std::sync::Arc;

/// Native file pickers
#[async_trait]
pub trait FileDialog: Send + Sync {
    /// Let the user pick audio files; cancelling yields an empty list
    async fn select_audio_files(&self) -> Result<Vec<PathBuf>>;

    /// Let the user pick a folder; cancelling yields `None`
    async fn select_folder(&self) -> Result<Option<PathBuf>>;
}

/// Launch-at-login integration
#[async_trait]
pub trait AutoStart: Send + Sync {
    async fn is_enabled(&self) -> Result<bool>;

    async fn set_enabled(&self, enabled: bool) -> Result<()>;
}

/// Dialog that returns preset answers
///
/// With no presets every dialog behaves as if the user cancelled.
#[derive(Debug, Clone, Default)]
pub struct PresetDialog {
    pub files: Vec<PathBuf>,
    pub folder: Option<PathBuf>,
}

#[async_trait]
impl FileDialog for PresetDialog {
    async fn select_audio_files(&self) -> Result<Vec<PathBuf>> {
        Ok(self.files.clone())
    }

    async fn select_folder(&self) -> Result<Option<PathBuf>> {
        Ok(self.folder.clone())
    }
}

/// Autostart flag kept in `playerSettings.autostart`
pub struct SettingsAutoStart {
    store: Arc<dyn DurableStore>,
}

impl SettingsAutoStart {
    pub fn new(store: Arc<dyn DurableStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AutoStart for SettingsAutoStart {
    async fn is_enabled(&self) -> Result<bool> {
        Ok(settings::load_player_settings(self.store.as_ref())
            .await?
            .autostart)
    }

    async fn set_enabled(&self, enabled: bool) -> Result<()> {
        let mut player = settings::load_player_settings(self.store.as_ref()).await?;
        player.autostart = enabled;
        settings::save_player_settings(self.store.as_ref(), &player).await?;
        tracing::info!(enabled, "Updated autostart");
        Ok(())
    }
}

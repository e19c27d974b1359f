//! Command surface for the UI
//!
//! Every command swallows its error: the failure is logged and an empty,
//! `false` or `None` value is returned, so nothing propagates across the
//! UI boundary.

use crate::app_state::Soundpad;
use soundpad_importer::{volumes, FileScanner, ScanResult};
use std::path::{Path, PathBuf};

/// Ask the user for audio files
pub async fn select_audio_files(app: &Soundpad) -> Vec<PathBuf> {
    app.dialog.select_audio_files().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "File dialog failed");
        Vec::new()
    })
}

/// Ask the user for a folder
pub async fn select_folder(app: &Soundpad) -> Option<PathBuf> {
    app.dialog.select_folder().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Folder dialog failed");
        None
    })
}

/// Audio files directly inside `folder`
pub async fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    let folder = folder.to_path_buf();
    tokio::task::spawn_blocking(move || soundpad_importer::scan_folder(&folder))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Folder scan task failed");
            Vec::new()
        })
}

/// Scan every volume (or the configured roots) for audio files
pub async fn scan_all_audio_files(app: &Soundpad) -> Vec<ScanResult> {
    let settings = &app.config().scan;
    let roots = if settings.roots.is_empty() {
        volumes::enumerate_volumes().await
    } else {
        settings.roots.clone()
    };

    FileScanner::new()
        .extensions(&settings.extensions)
        .exclude_names(settings.exclude_names.iter().cloned())
        .max_results(settings.max_results)
        .scan(&roots)
        .await
}

pub async fn get_auto_start_enabled(app: &Soundpad) -> bool {
    app.autostart.is_enabled().await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to read autostart state");
        false
    })
}

/// Returns whether the change was applied
pub async fn set_auto_start_enabled(app: &Soundpad, enabled: bool) -> bool {
    match app.autostart.set_enabled(enabled).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, enabled, "Failed to change autostart");
            false
        }
    }
}

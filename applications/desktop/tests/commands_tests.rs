//! Tests for the UI command surface

mod common;

use common::{write_file, Fixture};
use soundpad::commands;
use soundpad::platform::PresetDialog;
use soundpad_core::MemoryStore;
use std::sync::Arc;

#[tokio::test]
async fn scan_all_uses_configured_roots_and_extensions() {
    let fx = Fixture::new().await;
    fx.audio_file("music/a.mp3");
    fx.audio_file("music/b.wav");
    fx.audio_file("node_modules/c.mp3");

    let results = commands::scan_all_audio_files(&fx.app).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "a.mp3");
}

#[tokio::test]
async fn scan_folder_never_fails() {
    let fx = Fixture::new().await;
    fx.audio_file("x.m4a");

    assert_eq!(commands::scan_folder(fx.temp_dir.path()).await.len(), 1);
    assert!(commands::scan_folder(&fx.temp_dir.path().join("missing"))
        .await
        .is_empty());
}

#[tokio::test]
async fn dialogs_return_presets_or_nothing() {
    let fx = Fixture::new().await;
    assert!(commands::select_audio_files(&fx.app).await.is_empty());
    assert_eq!(commands::select_folder(&fx.app).await, None);

    let temp = tempfile::TempDir::new().unwrap();
    let file = write_file(temp.path(), "pick.mp3");
    let dialog = PresetDialog {
        files: vec![file.clone()],
        folder: Some(temp.path().to_path_buf()),
    };
    let fx = Fixture::with_store(Arc::new(MemoryStore::new()), dialog).await;

    assert_eq!(commands::select_audio_files(&fx.app).await, vec![file]);
    assert_eq!(
        commands::select_folder(&fx.app).await.as_deref(),
        Some(temp.path())
    );
}

#[tokio::test]
async fn autostart_round_trips_through_settings() {
    let fx = Fixture::new().await;
    assert!(!commands::get_auto_start_enabled(&fx.app).await);

    assert!(commands::set_auto_start_enabled(&fx.app, true).await);

    assert!(commands::get_auto_start_enabled(&fx.app).await);
    let saved = soundpad_storage::settings::load_player_settings(fx.store.as_ref())
        .await
        .unwrap();
    assert!(saved.autostart);
    assert_eq!(saved.volume, 0.8);
}

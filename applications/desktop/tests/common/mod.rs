//! Shared fixtures for host tests

#![allow(dead_code)]

use soundpad::backend::HeadlessBackend;
use soundpad::platform::{PresetDialog, SettingsAutoStart};
use soundpad::{AppConfig, Soundpad};
use soundpad_core::{DurableStore, MemoryStore};
use soundpad_playback::PlaybackEvent;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub struct Fixture {
    pub app: Soundpad,
    pub store: Arc<MemoryStore>,
    pub events: Arc<Mutex<Vec<PlaybackEvent>>>,
    pub temp_dir: TempDir,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), PresetDialog::default()).await
    }

    pub async fn with_store(store: Arc<MemoryStore>, dialog: PresetDialog) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = AppConfig::default();
        config.scan.roots = vec![temp_dir.path().to_path_buf()];

        let durable: Arc<dyn DurableStore> = store.clone();
        let mut app = Soundpad::load(
            durable.clone(),
            config,
            Box::new(HeadlessBackend),
            Box::new(dialog),
            Box::new(SettingsAutoStart::new(durable)),
        )
        .await
        .expect("Failed to load app");

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        app.set_observer(Box::new(move |event| {
            sink.lock().unwrap().push(event.clone());
        }));

        Self {
            app,
            store,
            events,
            temp_dir,
        }
    }

    /// Write a placeholder audio file under the temp dir
    pub fn audio_file(&self, name: &str) -> PathBuf {
        write_file(self.temp_dir.path(), name)
    }

    pub fn take_events(&self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

pub fn write_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, b"ID3 placeholder").unwrap();
    path
}

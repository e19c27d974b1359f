//! Application controller
//!
//! [`Soundpad`] owns every piece of mutable state: playlists, library,
//! hotkey registry and the playback sequencer. All mutations go through
//! `&mut self`, so they happen one at a time on the caller's timeline.

use crate::backend::HeadlessBackend;
use crate::config::AppConfig;
use crate::platform::{AutoStart, FileDialog, PresetDialog, SettingsAutoStart};
use soundpad_core::{DurableStore, Playlist, PlaylistId, Result, SoundpadError, Track, TrackId};
use soundpad_hotkeys::{Binding, HotkeyRegistry, KeyDescriptor};
use soundpad_importer::{is_audio_file, metadata, scan_folder};
use soundpad_playback::{
    MediaBackend, MediaEvent, PlaybackEvent, PlaybackSequencer, PlaybackState, RepeatMode,
    SequencerConfig,
};
use soundpad_storage::library::LibraryCatalog;
use soundpad_storage::playlists::PlaylistStore;
use soundpad_storage::{hotkeys, settings, SqliteStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Receives playback events after every handled operation
pub type EventObserver = Box<dyn FnMut(&PlaybackEvent) + Send>;

pub struct Soundpad {
    pub(crate) store: Arc<dyn DurableStore>,
    pub(crate) config: AppConfig,
    pub(crate) playlists: PlaylistStore,
    pub(crate) library: LibraryCatalog,
    pub(crate) hotkeys: HotkeyRegistry,
    pub(crate) sequencer: PlaybackSequencer,
    pub(crate) dialog: Box<dyn FileDialog>,
    pub(crate) autostart: Box<dyn AutoStart>,
    observer: Option<EventObserver>,
}

impl Soundpad {
    /// Open the SQLite database named in `config` with headless collaborators
    pub async fn open(config: AppConfig) -> crate::Result<Self> {
        let store: Arc<dyn DurableStore> =
            Arc::new(SqliteStore::open(&config.storage.database_path).await?);
        let autostart = Box::new(SettingsAutoStart::new(store.clone()));

        let app = Self::load(
            store,
            config,
            Box::new(HeadlessBackend),
            Box::new(PresetDialog::default()),
            autostart,
        )
        .await?;
        Ok(app)
    }

    /// Load all persisted state from `store`
    ///
    /// Legacy hotkeys are migrated here, after playlists are known.
    pub async fn load(
        store: Arc<dyn DurableStore>,
        config: AppConfig,
        backend: Box<dyn MediaBackend>,
        dialog: Box<dyn FileDialog>,
        autostart: Box<dyn AutoStart>,
    ) -> Result<Self> {
        let playlists = PlaylistStore::load(store.clone()).await?;
        let library = LibraryCatalog::load(store.clone()).await?;
        let hotkeys = hotkeys::load_registry(store.as_ref(), playlists.list()).await?;
        let player = settings::load_player_settings(store.as_ref()).await?;

        let sequencer = PlaybackSequencer::new(
            backend,
            SequencerConfig {
                volume: player.volume,
                history_size: config.playback.history_size,
                ..SequencerConfig::default()
            },
        );

        tracing::info!(
            playlists = playlists.list().len(),
            library = library.all().len(),
            hotkeys = hotkeys.len(),
            "Soundpad loaded"
        );

        Ok(Self {
            store,
            config,
            playlists,
            library,
            hotkeys,
            sequencer,
            dialog,
            autostart,
            observer: None,
        })
    }

    /// Forward playback events to `observer`
    pub fn set_observer(&mut self, observer: EventObserver) {
        self.observer = Some(observer);
    }

    // ===== Accessors =====

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn DurableStore> {
        &self.store
    }

    pub fn playlists(&self) -> &[Playlist] {
        self.playlists.list()
    }

    pub fn playlist(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.get(id)
    }

    pub fn library(&self) -> &[Track] {
        self.library.all()
    }

    pub fn hotkeys(&self) -> &HotkeyRegistry {
        &self.hotkeys
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.sequencer.state()
    }

    fn require_playlist(&self, id: &PlaylistId) -> Result<&Playlist> {
        self.playlists
            .get(id)
            .ok_or_else(|| SoundpadError::not_found("Playlist", id.as_str()))
    }

    // ===== Playlists =====

    pub async fn create_playlist(&mut self, name: &str) -> Result<Playlist> {
        self.playlists.create(name).await
    }

    pub async fn rename_playlist(&mut self, id: &PlaylistId, name: &str) -> Result<()> {
        self.playlists.rename(id, name).await
    }

    /// Delete a playlist together with its hotkeys
    pub async fn delete_playlist(&mut self, id: &PlaylistId) -> Result<Playlist> {
        let removed = self.playlists.delete(id).await?;
        self.sequencer.remove_playlist(id);
        if self.hotkeys.remove_playlist(id) {
            hotkeys::save_registry(self.store.as_ref(), &self.hotkeys).await?;
        }
        self.flush_events();
        Ok(removed)
    }

    /// Make `id` the playlist hotkeys resolve against
    pub fn select_playlist(&mut self, id: &PlaylistId) -> Result<()> {
        self.require_playlist(id)?;
        self.sequencer.select_playlist(id);
        Ok(())
    }

    /// Add audio files to a playlist and probe their durations
    ///
    /// Paths without a supported audio extension are skipped.
    pub async fn add_files(&mut self, id: &PlaylistId, paths: &[PathBuf]) -> Result<Vec<Track>> {
        let paths = audio_only(paths);
        if paths.is_empty() {
            self.require_playlist(id)?;
            return Ok(Vec::new());
        }

        let mut tracks = self.playlists.add_files(id, &paths).await?;
        for track in metadata::fill_durations(&mut tracks).await {
            self.playlists.update_track(&track).await?;
        }
        Ok(tracks)
    }

    /// Add every audio file directly inside `folder`
    pub async fn import_folder(&mut self, id: &PlaylistId, folder: &Path) -> Result<Vec<Track>> {
        let folder = folder.to_path_buf();
        let paths = tokio::task::spawn_blocking(move || scan_folder(&folder))
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Folder listing task failed");
                Vec::new()
            });
        self.add_files(id, &paths).await
    }

    /// Remove a track from a playlist
    ///
    /// If it is the current track, playback is stopped first. Its hotkeys
    /// are dropped in every playlist.
    pub async fn remove_track(&mut self, id: &PlaylistId, track_id: &TrackId) -> Result<Track> {
        if !self.require_playlist(id)?.contains(track_id) {
            return Err(SoundpadError::not_found("Track", track_id.as_str()));
        }

        self.sequencer.remove_track(track_id);
        let removed = self.playlists.remove_track(id, track_id).await?;
        if self.hotkeys.unbind_track_everywhere(track_id) > 0 {
            hotkeys::save_registry(self.store.as_ref(), &self.hotkeys).await?;
        }
        self.flush_events();
        Ok(removed)
    }

    pub fn search(&self, id: &PlaylistId, query: &str) -> Result<Vec<&Track>> {
        self.playlists.search(id, query)
    }

    // ===== Library =====

    pub async fn add_library_files(&mut self, paths: &[PathBuf]) -> Result<Vec<Track>> {
        let mut tracks = self.library.add_files(&audio_only(paths)).await?;
        for track in metadata::fill_durations(&mut tracks).await {
            self.library.update_track(&track).await?;
        }
        Ok(tracks)
    }

    /// Copy a library track into a playlist; `false` if already there
    pub async fn add_library_track(&mut self, id: &PlaylistId, track_id: &TrackId) -> Result<bool> {
        let track = self
            .library
            .get(track_id)
            .cloned()
            .ok_or_else(|| SoundpadError::not_found("Track", track_id.as_str()))?;
        self.playlists.add_track(id, track).await
    }

    /// Delete a track from the library, stopping it and dropping its hotkeys
    pub async fn delete_library_track(&mut self, track_id: &TrackId) -> Result<Track> {
        if self.library.get(track_id).is_none() {
            return Err(SoundpadError::not_found("Track", track_id.as_str()));
        }

        self.sequencer.remove_track(track_id);
        let removed = self.library.remove(track_id).await?;
        if self.hotkeys.unbind_track_everywhere(track_id) > 0 {
            hotkeys::save_registry(self.store.as_ref(), &self.hotkeys).await?;
        }
        self.flush_events();
        Ok(removed)
    }

    pub fn search_library(&self, query: &str) -> Vec<&Track> {
        self.library.search(query)
    }

    // ===== Hotkeys =====

    /// Bind `key` to a track of a playlist
    ///
    /// Without `overwrite` a key held by another track yields a `Conflict`
    /// and nothing changes; the caller asks the user and retries with
    /// `overwrite = true`.
    pub async fn bind_hotkey(
        &mut self,
        id: &PlaylistId,
        track_id: &TrackId,
        key: KeyDescriptor,
        overwrite: bool,
    ) -> Result<Binding> {
        if !self.require_playlist(id)?.contains(track_id) {
            return Err(SoundpadError::not_found("Track", track_id.as_str()));
        }

        let binding = if overwrite {
            self.hotkeys.bind_overwrite(id, track_id, key)
        } else {
            self.hotkeys.bind(id, track_id, key)?
        };
        hotkeys::save_registry(self.store.as_ref(), &self.hotkeys).await?;
        Ok(binding)
    }

    /// Bind `F<n>` to a track
    pub async fn bind_function_key(
        &mut self,
        id: &PlaylistId,
        track_id: &TrackId,
        n: u32,
        overwrite: bool,
    ) -> Result<Binding> {
        let key = KeyDescriptor::function_key(n)?;
        self.bind_hotkey(id, track_id, key, overwrite).await
    }

    pub async fn unbind_hotkey(
        &mut self,
        id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<Option<KeyDescriptor>> {
        let removed = self.hotkeys.unbind(id, track_id);
        if removed.is_some() {
            hotkeys::save_registry(self.store.as_ref(), &self.hotkeys).await?;
        }
        Ok(removed)
    }

    /// Clear every binding; confirmation is the caller's job
    pub async fn reset_hotkeys(&mut self) -> Result<()> {
        self.hotkeys.reset_all();
        hotkeys::save_registry(self.store.as_ref(), &self.hotkeys).await?;
        tracing::info!("Reset all hotkeys");
        Ok(())
    }

    // ===== Playback =====

    pub fn play(&mut self, id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        let playlist = self
            .playlists
            .get(id)
            .ok_or_else(|| SoundpadError::not_found("Playlist", id.as_str()))?;
        let result = self.sequencer.play(playlist, track_id);
        self.flush_events();
        Ok(result?)
    }

    pub fn toggle(&mut self) -> Result<()> {
        let result = self.sequencer.toggle();
        self.flush_events();
        Ok(result?)
    }

    pub fn next(&mut self) -> Result<()> {
        self.with_active_playlist(PlaybackSequencer::next)
    }

    pub fn previous(&mut self) -> Result<()> {
        self.with_active_playlist(PlaybackSequencer::previous)
    }

    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        let result = self.sequencer.seek(fraction);
        self.flush_events();
        Ok(result?)
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        self.sequencer.set_shuffle(enabled);
        self.flush_events();
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.sequencer.set_repeat(mode);
        self.flush_events();
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        let mode = self.sequencer.cycle_repeat();
        self.flush_events();
        mode
    }

    /// Change the live volume without saving it
    pub fn set_volume(&mut self, volume: f64) {
        self.sequencer.set_volume(volume);
        self.flush_events();
    }

    /// Save the live volume to `playerSettings`
    pub async fn commit_volume(&mut self) -> Result<f64> {
        let volume = self.sequencer.commit_volume();
        settings::save_volume(self.store.as_ref(), volume).await?;
        Ok(volume)
    }

    /// Route a notification from the media output
    pub fn on_media_event(&mut self, event: MediaEvent) -> Result<()> {
        let playlist = self
            .sequencer
            .current_playlist()
            .and_then(|id| self.playlists.get(id));
        let result = self.sequencer.on_media_event(playlist, event);
        self.flush_events();
        Ok(result?)
    }

    /// Run a navigation call against the active playlist
    ///
    /// A missing active playlist makes the call a no-op.
    pub(crate) fn with_active_playlist<F>(&mut self, op: F) -> Result<()>
    where
        F: FnOnce(&mut PlaybackSequencer, &Playlist) -> soundpad_playback::Result<()>,
    {
        let Self {
            sequencer,
            playlists,
            ..
        } = self;
        let Some(playlist) = sequencer.current_playlist().and_then(|id| playlists.get(id)) else {
            tracing::debug!("No active playlist");
            return Ok(());
        };
        let result = op(sequencer, playlist);
        self.flush_events();
        Ok(result?)
    }

    /// Hand queued playback events to the observer
    pub(crate) fn flush_events(&mut self) {
        let events = self.sequencer.drain_events();
        if let Some(observer) = self.observer.as_mut() {
            for event in &events {
                observer(event);
            }
        }
    }
}

fn audio_only(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|p| {
            let keep = is_audio_file(p);
            if !keep {
                tracing::debug!(path = %p.display(), "Skipping non-audio file");
            }
            keep
        })
        .cloned()
        .collect()
}

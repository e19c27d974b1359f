//! Playlist management
//!
//! [`PlaylistStore`] owns the playlist list in memory and writes the whole
//! `playlists` record back after every mutation.
//!
//! # Example
//!
//! ```rust,no_run
//! use soundpad_core::MemoryStore;
//! use soundpad_storage::playlists::PlaylistStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> soundpad_core::Result<()> {
//! let mut store = PlaylistStore::load(Arc::new(MemoryStore::new())).await?;
//! let playlist = store.create("Stream sounds").await?;
//! store.add_files(&playlist.id, &["/sfx/airhorn.mp3".into()]).await?;
//! # Ok(())
//! # }
//! ```

use rand::seq::SliceRandom;
use soundpad_core::storage::{keys, load_record, save_record};
use soundpad_core::types::PLAYLIST_COLORS;
use soundpad_core::{DurableStore, Playlist, PlaylistId, Result, SoundpadError, Track, TrackId};
use std::path::PathBuf;
use std::sync::Arc;

/// Ids of system playlists created by older releases; purged on load
pub const LEGACY_SYSTEM_PLAYLISTS: &[&str] = &["soundpad", "all-tracks"];

/// Id prefix for tracks added to a playlist
pub const TRACK_ID_PREFIX: &str = "track";

/// Playlists backed by a [`DurableStore`]
pub struct PlaylistStore {
    store: Arc<dyn DurableStore>,
    playlists: Vec<Playlist>,
}

impl PlaylistStore {
    /// Load playlists, purging legacy system playlists
    ///
    /// A missing or corrupt record yields an empty list.
    pub async fn load(store: Arc<dyn DurableStore>) -> Result<Self> {
        let mut playlists: Vec<Playlist> = load_record(store.as_ref(), keys::PLAYLISTS)
            .await?
            .unwrap_or_default();

        let before = playlists.len();
        playlists.retain(|p| !LEGACY_SYSTEM_PLAYLISTS.contains(&p.id.as_str()));
        let purged = before - playlists.len();

        let this = Self { store, playlists };
        if purged > 0 {
            tracing::info!(purged, "Removed legacy system playlists");
            this.persist().await?;
        }

        tracing::debug!(count = this.playlists.len(), "Loaded playlists");
        Ok(this)
    }

    async fn persist(&self) -> Result<()> {
        save_record(self.store.as_ref(), keys::PLAYLISTS, &self.playlists).await
    }

    /// All playlists in display order
    pub fn list(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Find a playlist by id
    pub fn get(&self, id: &PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| &p.id == id)
    }

    fn get_mut(&mut self, id: &PlaylistId) -> Result<&mut Playlist> {
        self.playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| SoundpadError::not_found("Playlist", id.as_str()))
    }

    /// Create a user playlist with a random palette color
    ///
    /// # Errors
    ///
    /// Returns a validation error when the trimmed name is empty.
    pub async fn create(&mut self, name: &str) -> Result<Playlist> {
        let name = validate_name(name)?;
        let color = PLAYLIST_COLORS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(PLAYLIST_COLORS[0]);

        let playlist = Playlist::new(name, color);
        self.playlists.push(playlist.clone());
        self.persist().await?;

        tracing::info!(id = %playlist.id, name = %playlist.name, "Created playlist");
        Ok(playlist)
    }

    /// Rename a playlist
    pub async fn rename(&mut self, id: &PlaylistId, name: &str) -> Result<()> {
        let name = validate_name(name)?;
        self.get_mut(id)?.name = name;
        self.persist().await
    }

    /// Delete a user playlist
    ///
    /// Hotkey bindings of the playlist are not touched here; the caller
    /// drops them from the registry.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and a validation error for a
    /// system playlist.
    pub async fn delete(&mut self, id: &PlaylistId) -> Result<Playlist> {
        let index = self
            .playlists
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| SoundpadError::not_found("Playlist", id.as_str()))?;
        if self.playlists[index].is_system {
            return Err(SoundpadError::validation("System playlists cannot be deleted"));
        }

        let removed = self.playlists.remove(index);
        self.persist().await?;

        tracing::info!(id = %removed.id, "Deleted playlist");
        Ok(removed)
    }

    /// Append tracks built from file paths
    pub async fn add_files(&mut self, id: &PlaylistId, paths: &[PathBuf]) -> Result<Vec<Track>> {
        let tracks: Vec<Track> = paths
            .iter()
            .map(|path| Track::from_path(TRACK_ID_PREFIX, path.clone()))
            .collect();

        self.get_mut(id)?.tracks.extend(tracks.iter().cloned());
        self.persist().await?;

        tracing::info!(playlist = %id, count = tracks.len(), "Added files to playlist");
        Ok(tracks)
    }

    /// Append an existing track (e.g. from the library)
    ///
    /// Returns `false` without changing anything if a track with the same
    /// id is already in the playlist.
    pub async fn add_track(&mut self, id: &PlaylistId, track: Track) -> Result<bool> {
        let playlist = self.get_mut(id)?;
        if playlist.contains(&track.id) {
            tracing::debug!(playlist = %id, track = %track.id, "Track already in playlist");
            return Ok(false);
        }
        playlist.tracks.push(track);
        self.persist().await?;
        Ok(true)
    }

    /// Remove a track from a playlist
    pub async fn remove_track(&mut self, id: &PlaylistId, track_id: &TrackId) -> Result<Track> {
        let playlist = self.get_mut(id)?;
        let index = playlist
            .position(track_id)
            .ok_or_else(|| SoundpadError::not_found("Track", track_id.as_str()))?;
        let removed = playlist.tracks.remove(index);
        self.persist().await?;

        tracing::info!(playlist = %id, track = %track_id, "Removed track from playlist");
        Ok(removed)
    }

    /// Replace every copy of `track` (matched by id) across playlists
    ///
    /// Used after metadata probing fills in the duration. Returns how many
    /// copies were updated.
    pub async fn update_track(&mut self, track: &Track) -> Result<usize> {
        let mut updated = 0;
        for slot in self
            .playlists
            .iter_mut()
            .flat_map(|p| p.tracks.iter_mut())
            .filter(|t| t.id == track.id)
        {
            *slot = track.clone();
            updated += 1;
        }
        if updated > 0 {
            self.persist().await?;
        }
        Ok(updated)
    }

    /// Case-insensitive search over title and artist within a playlist
    pub fn search(&self, id: &PlaylistId, query: &str) -> Result<Vec<&Track>> {
        let playlist = self
            .get(id)
            .ok_or_else(|| SoundpadError::not_found("Playlist", id.as_str()))?;
        Ok(playlist.tracks.iter().filter(|t| t.matches(query)).collect())
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(SoundpadError::validation("Playlist name cannot be empty"));
    }
    Ok(name.to_string())
}

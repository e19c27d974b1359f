//! Library catalog
//!
//! A flat list of every track the user imported, independent of
//! playlists. Stored under `library_tracks`.

use soundpad_core::storage::{keys, load_record, save_record};
use soundpad_core::{DurableStore, Result, SoundpadError, Track, TrackId};
use std::path::PathBuf;
use std::sync::Arc;

/// Id prefix for library tracks
pub const TRACK_ID_PREFIX: &str = "lib";

/// Library tracks backed by a [`DurableStore`]
pub struct LibraryCatalog {
    store: Arc<dyn DurableStore>,
    tracks: Vec<Track>,
}

impl LibraryCatalog {
    /// Load the catalog; a missing or corrupt record yields an empty library
    pub async fn load(store: Arc<dyn DurableStore>) -> Result<Self> {
        let tracks: Vec<Track> = load_record(store.as_ref(), keys::LIBRARY_TRACKS)
            .await?
            .unwrap_or_default();
        tracing::debug!(count = tracks.len(), "Loaded library");
        Ok(Self { store, tracks })
    }

    async fn persist(&self) -> Result<()> {
        save_record(self.store.as_ref(), keys::LIBRARY_TRACKS, &self.tracks).await
    }

    /// Every library track in insertion order
    pub fn all(&self) -> &[Track] {
        &self.tracks
    }

    /// Find a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Import files, skipping paths that are already in the library
    pub async fn add_files(&mut self, paths: &[PathBuf]) -> Result<Vec<Track>> {
        let mut added = Vec::new();
        for path in paths {
            if self.tracks.iter().any(|t| &t.path == path) {
                continue;
            }
            let track = Track::from_path(TRACK_ID_PREFIX, path.clone());
            self.tracks.push(track.clone());
            added.push(track);
        }

        if !added.is_empty() {
            self.persist().await?;
            tracing::info!(count = added.len(), "Added tracks to library");
        }
        Ok(added)
    }

    /// Replace a track by id
    pub async fn update_track(&mut self, track: &Track) -> Result<()> {
        let slot = self
            .tracks
            .iter_mut()
            .find(|t| t.id == track.id)
            .ok_or_else(|| SoundpadError::not_found("Track", track.id.as_str()))?;
        *slot = track.clone();
        self.persist().await
    }

    /// Remove a track by id
    pub async fn remove(&mut self, id: &TrackId) -> Result<Track> {
        let index = self
            .tracks
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| SoundpadError::not_found("Track", id.as_str()))?;
        let removed = self.tracks.remove(index);
        self.persist().await?;

        tracing::info!(track = %id, "Removed track from library");
        Ok(removed)
    }

    /// Case-insensitive search over title and artist
    pub fn search(&self, query: &str) -> Vec<&Track> {
        self.tracks.iter().filter(|t| t.matches(query)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundpad_core::MemoryStore;

    #[tokio::test]
    async fn add_files_skips_known_paths() {
        let mut library = LibraryCatalog::load(Arc::new(MemoryStore::new()))
            .await
            .unwrap();

        let first = library
            .add_files(&["/sfx/a.mp3".into(), "/sfx/b.wav".into()])
            .await
            .unwrap();
        let second = library.add_files(&["/sfx/a.mp3".into()]).await.unwrap();

        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
        assert!(library.all().iter().all(|t| t.id.as_str().starts_with("lib_")));
    }

    #[tokio::test]
    async fn update_track_persists_duration() {
        let mem = Arc::new(MemoryStore::new());
        let mut library = LibraryCatalog::load(mem.clone()).await.unwrap();
        let mut track = library.add_files(&["/sfx/a.mp3".into()]).await.unwrap().remove(0);

        track.duration_seconds = 1.5;
        library.update_track(&track).await.unwrap();

        let reloaded = LibraryCatalog::load(mem).await.unwrap();
        assert_eq!(reloaded.get(&track.id).unwrap().duration_seconds, 1.5);
    }

    #[tokio::test]
    async fn remove_unknown_track_is_not_found() {
        let mut library = LibraryCatalog::load(Arc::new(MemoryStore::new()))
            .await
            .unwrap();
        let err = library.remove(&TrackId::new("lib_missing")).await.unwrap_err();
        assert!(matches!(err, SoundpadError::NotFound { .. }));
    }
}

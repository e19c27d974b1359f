//! Durable key/value store abstraction
//!
//! Soundpad persists a handful of JSON records under fixed keys (see
//! [`keys`]). The medium is opaque: production uses SQLite via
//! `soundpad-storage`, tests use [`MemoryStore`].
//!
//! Typed access goes through [`load_record`] and [`save_record`]. A record
//! that does not parse is treated as absent rather than as an error, so a
//! corrupt value can never keep the application from starting.

use crate::error::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Logical record keys
pub mod keys {
    /// List of playlists
    pub const PLAYLISTS: &str = "playlists";
    /// Flat library track list
    pub const LIBRARY_TRACKS: &str = "library_tracks";
    /// Per-playlist hotkey table: playlist id -> (key -> track id)
    pub const PLAYLIST_HOTKEYS: &str = "soundpad_playlist_hotkeys";
    /// Legacy global hotkey map: key -> track id (deleted after migration)
    pub const LEGACY_HOTKEYS: &str = "soundpad_hotkeys";
    /// `{ volume, theme, autostart }`
    pub const PLAYER_SETTINGS: &str = "playerSettings";
    /// Plain theme name
    pub const SELECTED_THEME: &str = "selectedTheme";
    /// Plain view mode name
    pub const VIEW_MODE: &str = "viewMode";
}

/// Process-exclusive key/value persistence
///
/// Writes are last-writer-wins; no optimistic concurrency is attempted.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Read the raw value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently present
    async fn keys(&self) -> Result<Vec<String>>;

    /// Whether `key` is present
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Load and deserialize a JSON record
///
/// Returns `Ok(None)` when the key is missing or its value is corrupt.
/// Only a failure of the store itself is reported as an error.
pub async fn load_record<T, S>(store: &S, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: DurableStore + ?Sized,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring corrupt record");
            Ok(None)
        }
    }
}

/// Serialize and store a JSON record
pub async fn save_record<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: DurableStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}

/// In-memory store
///
/// Used by tests and by headless runs that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with raw values
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.entries.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Playlist;

    #[tokio::test]
    async fn round_trips_typed_records() {
        let store = MemoryStore::new();
        let playlists = vec![Playlist::new("A", "#3a86ff")];

        save_record(&store, keys::PLAYLISTS, &playlists).await.unwrap();
        let loaded: Vec<Playlist> = load_record(&store, keys::PLAYLISTS)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(loaded, playlists);
    }

    #[tokio::test]
    async fn corrupt_record_reads_as_absent() {
        let store = MemoryStore::with_entries([(keys::PLAYLISTS, "{not json")]);
        let loaded: Option<Vec<Playlist>> = load_record(&store, keys::PLAYLISTS).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        store.remove(keys::LEGACY_HOTKEYS).await.unwrap();
        assert!(!store.contains(keys::LEGACY_HOTKEYS).await.unwrap());
    }
}

//! Per-playlist hotkey registry

use crate::error::{HotkeyError, Result};
use crate::key::KeyDescriptor;
use crate::migration::{self, LegacyBindings, MigrationReport};
use serde::{Deserialize, Serialize};
use soundpad_core::{Playlist, PlaylistId, TrackId};
use std::collections::BTreeMap;

/// Bindings of a single playlist
pub type PlaylistBindings = BTreeMap<KeyDescriptor, TrackId>;

/// Stored form: playlist id -> canonical key string -> track id
type RawTable = BTreeMap<PlaylistId, BTreeMap<String, TrackId>>;

/// Persisted hotkey table
///
/// Serializes as `{ playlistId: { "Ctrl+1": trackId } }`. Entries whose key
/// string no longer parses are dropped on load, and duplicate tracks within
/// a playlist keep only their first key, so a loaded table always satisfies
/// the registry invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTable", into = "RawTable")]
pub struct HotkeyTable(BTreeMap<PlaylistId, PlaylistBindings>);

impl From<RawTable> for HotkeyTable {
    fn from(raw: RawTable) -> Self {
        let mut table = BTreeMap::new();
        for (playlist_id, entries) in raw {
            let mut bindings = PlaylistBindings::new();
            for (raw_key, track_id) in entries {
                let key = match raw_key.parse::<KeyDescriptor>() {
                    Ok(key) => key,
                    Err(e) => {
                        tracing::warn!(playlist = %playlist_id, key = %raw_key, error = %e, "Dropping unparsable hotkey");
                        continue;
                    }
                };
                if bindings.contains_key(&key) || bindings.values().any(|t| t == &track_id) {
                    tracing::warn!(playlist = %playlist_id, key = %key, track = %track_id, "Dropping duplicate hotkey");
                    continue;
                }
                bindings.insert(key, track_id);
            }
            if !bindings.is_empty() {
                table.insert(playlist_id, bindings);
            }
        }
        Self(table)
    }
}

impl From<HotkeyTable> for RawTable {
    fn from(table: HotkeyTable) -> Self {
        table
            .0
            .into_iter()
            .map(|(playlist_id, bindings)| {
                let entries = bindings
                    .into_iter()
                    .map(|(key, track_id)| (key.to_string(), track_id))
                    .collect();
                (playlist_id, entries)
            })
            .collect()
    }
}

/// Effect of a successful bind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binding {
    /// Key the track held before in this playlist, if different
    pub previous_key: Option<KeyDescriptor>,
    /// Track that lost the key (only from `bind_overwrite`)
    pub displaced_track: Option<TrackId>,
}

/// Playlist-scoped hotkey registry
///
/// Holds at most one track per key and one key per track inside each
/// playlist. Playlists with no bindings are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyRegistry {
    table: HotkeyTable,
}

impl HotkeyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a loaded table
    pub fn from_table(table: HotkeyTable) -> Self {
        Self { table }
    }

    /// Persistable snapshot
    pub fn table(&self) -> &HotkeyTable {
        &self.table
    }

    /// Whether no playlist has any binding
    pub fn is_empty(&self) -> bool {
        self.table.0.is_empty()
    }

    /// Total number of bindings across all playlists
    pub fn len(&self) -> usize {
        self.table.0.values().map(BTreeMap::len).sum()
    }

    /// Bind `key` to `track` in `playlist`
    ///
    /// Any key the track already held in this playlist is released. Binding
    /// a key to the track that already holds it is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HotkeyError::Conflict`] when another track in the playlist
    /// holds `key`. Nothing is changed in that case.
    pub fn bind(
        &mut self,
        playlist: &PlaylistId,
        track: &TrackId,
        key: KeyDescriptor,
    ) -> Result<Binding> {
        if let Some(existing) = self.resolve(playlist, &key) {
            if existing != track {
                return Err(HotkeyError::Conflict {
                    key: key.to_string(),
                    existing_track_id: existing.clone(),
                });
            }
            return Ok(Binding::default());
        }
        Ok(self.insert(playlist, track, key))
    }

    /// Bind `key` to `track`, taking the key from whichever track holds it
    pub fn bind_overwrite(
        &mut self,
        playlist: &PlaylistId,
        track: &TrackId,
        key: KeyDescriptor,
    ) -> Binding {
        if self.resolve(playlist, &key) == Some(track) {
            return Binding::default();
        }
        self.insert(playlist, track, key)
    }

    /// Bind function key `F<n>` to `track`
    ///
    /// # Errors
    ///
    /// Returns [`HotkeyError::InvalidFunctionKey`] for `n` outside `1..=12`
    /// and [`HotkeyError::Conflict`] when the key is taken.
    pub fn bind_function_key(
        &mut self,
        playlist: &PlaylistId,
        track: &TrackId,
        n: u32,
    ) -> Result<Binding> {
        let key = KeyDescriptor::function_key(n)?;
        self.bind(playlist, track, key)
    }

    fn insert(&mut self, playlist: &PlaylistId, track: &TrackId, key: KeyDescriptor) -> Binding {
        let bindings = self.table.0.entry(playlist.clone()).or_default();

        let previous_key = bindings
            .iter()
            .find(|(_, t)| *t == track)
            .map(|(k, _)| k.clone());
        if let Some(previous) = &previous_key {
            bindings.remove(previous);
        }
        let displaced_track = bindings.insert(key.clone(), track.clone());

        tracing::debug!(playlist = %playlist, track = %track, key = %key, "Bound hotkey");
        Binding {
            previous_key,
            displaced_track,
        }
    }

    /// Remove the key bound to `track` in `playlist`
    pub fn unbind(&mut self, playlist: &PlaylistId, track: &TrackId) -> Option<KeyDescriptor> {
        let bindings = self.table.0.get_mut(playlist)?;
        let key = bindings
            .iter()
            .find(|(_, t)| *t == track)
            .map(|(k, _)| k.clone())?;
        bindings.remove(&key);
        self.prune(playlist);
        Some(key)
    }

    /// Remove every binding to `track` in `playlist`, returning how many
    pub fn unbind_all_for_track(&mut self, playlist: &PlaylistId, track: &TrackId) -> usize {
        let Some(bindings) = self.table.0.get_mut(playlist) else {
            return 0;
        };
        let before = bindings.len();
        bindings.retain(|_, t| t != track);
        let removed = before - bindings.len();
        self.prune(playlist);
        removed
    }

    /// Remove bindings to `track` in every playlist, returning how many
    pub fn unbind_track_everywhere(&mut self, track: &TrackId) -> usize {
        let mut removed = 0;
        for bindings in self.table.0.values_mut() {
            let before = bindings.len();
            bindings.retain(|_, t| t != track);
            removed += before - bindings.len();
        }
        self.table.0.retain(|_, bindings| !bindings.is_empty());
        removed
    }

    /// Drop all bindings of a playlist
    pub fn remove_playlist(&mut self, playlist: &PlaylistId) -> bool {
        self.table.0.remove(playlist).is_some()
    }

    /// Drop every binding in every playlist
    pub fn reset_all(&mut self) {
        self.table.0.clear();
    }

    /// Track bound to `key` in `playlist`
    pub fn resolve(&self, playlist: &PlaylistId, key: &KeyDescriptor) -> Option<&TrackId> {
        self.table.0.get(playlist)?.get(key)
    }

    /// Key bound to `track` in `playlist`
    pub fn key_for_track(&self, playlist: &PlaylistId, track: &TrackId) -> Option<&KeyDescriptor> {
        self.table
            .0
            .get(playlist)?
            .iter()
            .find(|(_, t)| *t == track)
            .map(|(k, _)| k)
    }

    /// Bindings of `playlist` in key order
    pub fn bindings(
        &self,
        playlist: &PlaylistId,
    ) -> impl Iterator<Item = (&KeyDescriptor, &TrackId)> + '_ {
        self.table.0.get(playlist).into_iter().flatten()
    }

    /// Playlists that have at least one binding
    pub fn playlists(&self) -> impl Iterator<Item = &PlaylistId> + '_ {
        self.table.0.keys()
    }

    /// Import legacy global bindings into per-playlist ones
    ///
    /// Runs only while the registry is empty. Each legacy binding goes to the
    /// first playlist, in list order, containing its track; bindings whose
    /// track is in no playlist, or whose key does not parse, are discarded.
    pub fn migrate_legacy(
        &mut self,
        legacy: &LegacyBindings,
        playlists: &[Playlist],
    ) -> MigrationReport {
        if !self.is_empty() {
            return MigrationReport::skipped();
        }
        migration::apply(self, legacy, playlists)
    }

    fn prune(&mut self, playlist: &PlaylistId) {
        if self.table.0.get(playlist).is_some_and(BTreeMap::is_empty) {
            self.table.0.remove(playlist);
        }
    }
}

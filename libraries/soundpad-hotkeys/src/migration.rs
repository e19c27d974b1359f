//! Legacy global hotkeys
//!
//! Older releases stored one flat `key -> track` map for the whole app. The
//! first load with an empty per-playlist table moves each binding into the
//! first playlist (in list order) that holds the track. The caller deletes
//! the legacy record afterwards whether or not anything was moved.

use crate::key::KeyDescriptor;
use crate::registry::HotkeyRegistry;
use serde::{Deserialize, Serialize};
use soundpad_core::{Playlist, TrackId};
use std::collections::BTreeMap;

/// Legacy flat map: raw key string -> track id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyBindings(pub BTreeMap<String, TrackId>);

impl LegacyBindings {
    /// Whether the legacy map has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, TrackId)> for LegacyBindings {
    fn from_iter<I: IntoIterator<Item = (K, TrackId)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, t)| (k.into(), t)).collect())
    }
}

/// Outcome of a legacy import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Registry already had bindings; nothing was imported
    pub skipped: bool,
    /// Bindings written
    pub migrated: usize,
    /// Legacy entries dropped: unknown track or unparsable key
    pub discarded: usize,
}

impl MigrationReport {
    pub(crate) fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

pub(crate) fn apply(
    registry: &mut HotkeyRegistry,
    legacy: &LegacyBindings,
    playlists: &[Playlist],
) -> MigrationReport {
    let mut report = MigrationReport::default();

    for (raw_key, track_id) in &legacy.0 {
        let Ok(key) = raw_key.parse::<KeyDescriptor>() else {
            tracing::warn!(key = %raw_key, "Discarding legacy hotkey with unparsable key");
            report.discarded += 1;
            continue;
        };

        let Some(playlist) = playlists.iter().find(|p| p.contains(track_id)) else {
            tracing::debug!(key = %key, track = %track_id, "Discarding legacy hotkey for unknown track");
            report.discarded += 1;
            continue;
        };

        // Later legacy keys for the same track win, keeping one key per track
        registry.bind_overwrite(&playlist.id, track_id, key);
        report.migrated += 1;
    }

    tracing::info!(
        migrated = report.migrated,
        discarded = report.discarded,
        "Migrated legacy hotkeys"
    );
    report
}

//! Persisted hotkey bindings
//!
//! Loads the per-playlist table from `soundpad_playlist_hotkeys` and, the
//! first time, folds in the legacy global map stored under
//! `soundpad_hotkeys`. The legacy record is deleted as soon as it has been
//! seen, so the migration runs at most once.

use soundpad_core::storage::{keys, load_record, save_record};
use soundpad_core::{DurableStore, Playlist, Result};
use soundpad_hotkeys::{HotkeyRegistry, HotkeyTable, LegacyBindings};

/// Load the hotkey registry, migrating legacy bindings if needed
///
/// A corrupt per-playlist table reads as empty. A legacy record next to a
/// non-empty table is stale and is deleted without being applied.
pub async fn load_registry(
    store: &dyn DurableStore,
    playlists: &[Playlist],
) -> Result<HotkeyRegistry> {
    let table: HotkeyTable = load_record(store, keys::PLAYLIST_HOTKEYS)
        .await?
        .unwrap_or_default();
    let mut registry = HotkeyRegistry::from_table(table);

    if !store.contains(keys::LEGACY_HOTKEYS).await? {
        return Ok(registry);
    }

    let legacy: LegacyBindings = load_record(store, keys::LEGACY_HOTKEYS)
        .await?
        .unwrap_or_default();

    if registry.is_empty() && !legacy.is_empty() {
        let report = registry.migrate_legacy(&legacy, playlists);
        tracing::info!(
            migrated = report.migrated,
            discarded = report.discarded,
            "Imported legacy hotkeys"
        );
        save_registry(store, &registry).await?;
    } else {
        tracing::debug!("Dropping stale legacy hotkey record");
    }

    store.remove(keys::LEGACY_HOTKEYS).await?;
    Ok(registry)
}

/// Persist the registry table
pub async fn save_registry(store: &dyn DurableStore, registry: &HotkeyRegistry) -> Result<()> {
    save_record(store, keys::PLAYLIST_HOTKEYS, registry.table()).await
}

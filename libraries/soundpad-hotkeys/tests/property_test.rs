//! Property-based tests for the hotkey registry
//!
//! Random sequences of bind / overwrite / unbind must never break the
//! per-playlist uniqueness rules.

use proptest::prelude::*;
use soundpad_core::{PlaylistId, TrackId};
use soundpad_hotkeys::{HotkeyError, HotkeyRegistry, HotkeyTable, KeyDescriptor};
use std::collections::HashSet;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Bind { playlist: u8, track: u8, key: u8 },
    Overwrite { playlist: u8, track: u8, key: u8 },
    Unbind { playlist: u8, track: u8 },
    UnbindEverywhere { track: u8 },
    RemovePlaylist { playlist: u8 },
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..3, 0u8..6, 1u8..=12).prop_map(|(playlist, track, key)| Op::Bind { playlist, track, key }),
        (0u8..3, 0u8..6, 1u8..=12)
            .prop_map(|(playlist, track, key)| Op::Overwrite { playlist, track, key }),
        (0u8..3, 0u8..6).prop_map(|(playlist, track)| Op::Unbind { playlist, track }),
        (0u8..6).prop_map(|track| Op::UnbindEverywhere { track }),
        (0u8..3).prop_map(|playlist| Op::RemovePlaylist { playlist }),
    ]
}

fn playlist(n: u8) -> PlaylistId {
    PlaylistId::new(format!("playlist_{n}"))
}

fn track(n: u8) -> TrackId {
    TrackId::new(format!("track_{n}"))
}

fn key(n: u8) -> KeyDescriptor {
    KeyDescriptor::function_key(u32::from(n)).unwrap()
}

fn assert_unique_tracks(registry: &HotkeyRegistry) -> Result<(), TestCaseError> {
    for p in registry.playlists() {
        let mut seen = HashSet::new();
        for (_, t) in registry.bindings(p) {
            prop_assert!(seen.insert(t.clone()), "track {} bound twice in {}", t, p);
        }
    }
    Ok(())
}

// ===== Property Tests =====

proptest! {
    /// Property: a track never holds two keys in one playlist
    #[test]
    fn one_key_per_track_per_playlist(ops in prop::collection::vec(arbitrary_op(), 1..60)) {
        let mut registry = HotkeyRegistry::new();

        for op in ops {
            match op {
                Op::Bind { playlist: p, track: t, key: k } => {
                    let _ = registry.bind(&playlist(p), &track(t), key(k));
                }
                Op::Overwrite { playlist: p, track: t, key: k } => {
                    registry.bind_overwrite(&playlist(p), &track(t), key(k));
                }
                Op::Unbind { playlist: p, track: t } => {
                    registry.unbind(&playlist(p), &track(t));
                }
                Op::UnbindEverywhere { track: t } => {
                    registry.unbind_track_everywhere(&track(t));
                }
                Op::RemovePlaylist { playlist: p } => {
                    registry.remove_playlist(&playlist(p));
                }
            }
            assert_unique_tracks(&registry)?;
        }
    }

    /// Property: a rejected bind changes nothing and names the holder
    #[test]
    fn conflict_is_side_effect_free(
        holder in 0u8..6,
        challenger in 0u8..6,
        k in 1u8..=12,
    ) {
        prop_assume!(holder != challenger);
        let p = playlist(0);
        let mut registry = HotkeyRegistry::new();
        registry.bind(&p, &track(holder), key(k)).unwrap();
        let before = registry.clone();

        let result = registry.bind(&p, &track(challenger), key(k));

        prop_assert_eq!(
            result,
            Err(HotkeyError::Conflict {
                key: key(k).to_string(),
                existing_track_id: track(holder),
            })
        );
        prop_assert_eq!(registry, before);
    }

    /// Property: after a successful bind the key resolves to the track
    #[test]
    fn bind_then_resolve(p in 0u8..3, t in 0u8..6, k in 1u8..=12) {
        let mut registry = HotkeyRegistry::new();
        registry.bind(&playlist(p), &track(t), key(k)).unwrap();

        prop_assert_eq!(registry.resolve(&playlist(p), &key(k)), Some(&track(t)));
        prop_assert_eq!(registry.key_for_track(&playlist(p), &track(t)), Some(&key(k)));
    }

    /// Property: persisting and reloading yields the same registry
    #[test]
    fn table_survives_persistence(ops in prop::collection::vec(arbitrary_op(), 1..30)) {
        let mut registry = HotkeyRegistry::new();
        for op in ops {
            if let Op::Overwrite { playlist: p, track: t, key: k } | Op::Bind { playlist: p, track: t, key: k } = op {
                registry.bind_overwrite(&playlist(p), &track(t), key(k));
            }
        }

        let json = serde_json::to_string(registry.table()).unwrap();
        let table: HotkeyTable = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(HotkeyRegistry::from_table(table), registry);
    }

    /// Property: function keys outside 1..=12 are always rejected
    #[test]
    fn function_key_range(n in 0u32..100) {
        let result = KeyDescriptor::function_key(n);
        if (1..=12).contains(&n) {
            prop_assert_eq!(result.unwrap().to_string(), format!("F{n}"));
        } else {
            prop_assert_eq!(result, Err(HotkeyError::InvalidFunctionKey(n)));
        }
    }
}

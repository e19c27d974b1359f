//! Soundpad - Hotkey Bindings
//!
//! Per-playlist keyboard bindings for Soundpad.
//!
//! This crate provides:
//! - Canonical key descriptors (`Ctrl+Alt+Shift+Meta+Key`)
//! - A registry mapping playlist -> (key -> track) with uniqueness rules
//! - Conflict reporting when a key is already taken in a playlist
//! - One-shot migration from the legacy global `key -> track` map
//!
//! # Invariants
//!
//! Within one playlist a key maps to at most one track, and a track holds
//! at most one key. Different playlists may bind the same key to different
//! tracks.
//!
//! The registry is pure state: persistence lives in `soundpad-storage`
//! and interactive confirmation lives in the host. A conflicting `bind`
//! returns [`HotkeyError::Conflict`]; the caller decides whether to call
//! [`HotkeyRegistry::bind_overwrite`].
//!
//! # Example
//!
//! ```rust
//! use soundpad_core::{PlaylistId, TrackId};
//! use soundpad_hotkeys::{HotkeyError, HotkeyRegistry, KeyDescriptor};
//!
//! let mut registry = HotkeyRegistry::new();
//! let playlist = PlaylistId::new("playlist_1");
//! let key: KeyDescriptor = "Alt+Ctrl+1".parse().unwrap();
//! assert_eq!(key.to_string(), "Ctrl+Alt+1");
//!
//! registry.bind(&playlist, &TrackId::new("a"), key.clone()).unwrap();
//! assert!(matches!(
//!     registry.bind(&playlist, &TrackId::new("b"), key.clone()),
//!     Err(HotkeyError::Conflict { .. })
//! ));
//! assert_eq!(registry.resolve(&playlist, &key), Some(&TrackId::new("a")));
//! ```

mod error;
mod key;
mod migration;
mod registry;

pub use error::{HotkeyError, Result};
pub use key::{KeyDescriptor, Modifiers, FUNCTION_KEY_RANGE};
pub use migration::{LegacyBindings, MigrationReport};
pub use registry::{Binding, HotkeyRegistry, HotkeyTable, PlaylistBindings};

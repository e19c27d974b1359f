//! Soundpad Core
//!
//! Platform-agnostic core types, errors and persistence abstraction for Soundpad.
//!
//! This crate provides the foundational building blocks used by every other
//! Soundpad crate (storage, hotkeys, playback, importer and the desktop host).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `TrackId`, `PlaylistId`
//! - **Durable Store**: the `DurableStore` key/value trait, typed record
//!   helpers and an in-memory implementation
//! - **Error Handling**: unified `SoundpadError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soundpad_core::types::{Playlist, Track};
//! use std::path::PathBuf;
//!
//! let mut playlist = Playlist::new("Memes", "#8338ec");
//! let track = Track::from_path("track", PathBuf::from("/sounds/airhorn.mp3"));
//! playlist.tracks.push(track);
//!
//! assert_eq!(playlist.tracks[0].title, "airhorn");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SoundpadError};
pub use storage::{DurableStore, MemoryStore};
pub use types::{Playlist, PlaylistId, Track, TrackId};

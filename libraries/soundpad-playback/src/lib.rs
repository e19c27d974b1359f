//! Soundpad - Playback Sequencing
//!
//! Platform-agnostic playback control for Soundpad.
//!
//! This crate provides:
//! - Track selection on play / next / previous / end-of-track
//! - Shuffle (no immediate self-repeat) and repeat modes (None, All, One)
//! - Live volume with an explicit commit step
//! - Bounded play history
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `soundpad-playback` does no decoding or output. The host provides a
//! [`MediaBackend`] that opens a path at a volume and returns a
//! [`MediaHandle`]; [`PlaybackSequencer`] owns the single live handle.
//!
//! # Example
//!
//! ```rust
//! use soundpad_core::{Playlist, Track};
//! use soundpad_playback::{
//!     MediaBackend, MediaHandle, PlaybackSequencer, RepeatMode, Result, SequencerConfig,
//! };
//! use std::path::Path;
//!
//! struct Silent;
//! struct SilentHandle;
//!
//! impl MediaBackend for Silent {
//!     fn load(&self, _path: &Path, _volume: f64) -> Result<Box<dyn MediaHandle>> {
//!         Ok(Box::new(SilentHandle))
//!     }
//! }
//!
//! impl MediaHandle for SilentHandle {
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) -> Result<()> { Ok(()) }
//!     fn position(&self) -> f64 { 0.0 }
//!     fn duration(&self) -> Option<f64> { None }
//!     fn set_volume(&mut self, _volume: f64) {}
//!     fn stop(&mut self) {}
//! }
//!
//! let mut playlist = Playlist::new("Memes", "#8338ec");
//! playlist.tracks.push(Track::from_path("track", "/sfx/a.mp3"));
//! playlist.tracks.push(Track::from_path("track", "/sfx/b.mp3"));
//! let first = playlist.tracks[0].id.clone();
//!
//! let mut sequencer = PlaybackSequencer::new(Box::new(Silent), SequencerConfig::default());
//! sequencer.set_repeat(RepeatMode::All);
//! sequencer.play(&playlist, &first).unwrap();
//! sequencer.next(&playlist).unwrap();
//! sequencer.next(&playlist).unwrap();
//!
//! assert_eq!(sequencer.current_track(), Some(&first));
//! assert!(sequencer.is_playing());
//! ```

mod error;
mod events;
mod history;
mod media;
mod sequencer;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::History;
pub use media::{MediaBackend, MediaEvent, MediaHandle};
pub use sequencer::PlaybackSequencer;
pub use types::{PlaybackState, RepeatMode, SequencerConfig};
pub use volume::Volume;

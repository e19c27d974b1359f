//! Media playback capability
//!
//! Decoding and output are not part of Soundpad. The host supplies a
//! [`MediaBackend`] that turns a file path into a [`MediaHandle`]; the
//! sequencer owns at most one handle at a time and is the only code that
//! touches it.

use crate::error::Result;
use std::path::Path;

/// Factory for media handles
pub trait MediaBackend: Send {
    /// Bind a new handle to `path` with the given volume
    ///
    /// The handle starts paused at position 0.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Media`](crate::PlaybackError::Media) if the
    /// source cannot be opened.
    fn load(&self, path: &Path, volume: f64) -> Result<Box<dyn MediaHandle>>;
}

/// A single loaded media source
///
/// `play` is synchronous: it returns once output has started, or with an
/// error if it could not start.
pub trait MediaHandle: Send {
    /// Start or resume output
    fn play(&mut self) -> Result<()>;

    /// Pause output, keeping the position
    fn pause(&mut self);

    /// Jump to `seconds` from the start
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Current position in seconds
    fn position(&self) -> f64;

    /// Total duration in seconds, if known
    fn duration(&self) -> Option<f64>;

    /// Apply a new volume in `[0, 1]`
    fn set_volume(&mut self, volume: f64);

    /// Release the source; the handle is discarded afterwards
    fn stop(&mut self);
}

/// Notifications a media handle reports back through the host
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Periodic position update
    Progress {
        /// Position in seconds
        position: f64,
        /// Duration in seconds, if known
        duration: Option<f64>,
    },

    /// Playback reached end of stream
    Ended,

    /// The source failed while playing
    Error(String),
}

//! Playback events
//!
//! The sequencer queues an event for every observable change. The host
//! drains them after each operation and forwards them to the presentation
//! layer.

use serde::{Deserialize, Serialize};
use soundpad_core::TrackId;

/// Events emitted by the sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Playing / paused flag changed
    StateChanged {
        /// New value of `is_playing`
        is_playing: bool,
    },

    /// A different track became current (or none)
    TrackChanged {
        /// New current track
        track_id: Option<TrackId>,
        /// Previous current track
        previous_track_id: Option<TrackId>,
    },

    /// Current track jumped back to position 0
    Restarted {
        /// The restarted track
        track_id: TrackId,
    },

    /// Track reached its natural end
    TrackFinished {
        /// The finished track
        track_id: TrackId,
    },

    /// Position update
    Progress {
        /// Position in seconds
        position: f64,
        /// Duration in seconds, if known
        duration: Option<f64>,
    },

    /// Live volume changed
    VolumeChanged {
        /// New live volume
        volume: f64,
    },

    /// Shuffle flag changed
    ShuffleChanged {
        /// New shuffle flag
        enabled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        mode: crate::RepeatMode,
    },

    /// A load, play or in-flight media failure
    Error {
        /// Human-readable message
        message: String,
    },
}

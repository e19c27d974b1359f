//! Core types for playback sequencing

use serde::{Deserialize, Serialize};
use soundpad_core::{PlaylistId, TrackId};

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop at the end of the playlist
    #[default]
    None,

    /// Loop the playlist
    All,

    /// Loop the current track
    One,
}

impl RepeatMode {
    /// Next mode in the repeat button cycle: None -> All -> One -> None
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::All,
            Self::All => Self::One,
            Self::One => Self::None,
        }
    }
}

/// Sequencer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerConfig {
    /// Initial volume in `[0, 1]` (default: 0.8)
    pub volume: f64,

    /// Maximum play history size (default: 50)
    pub history_size: usize,

    /// Initial shuffle flag
    pub shuffle: bool,

    /// Initial repeat mode
    pub repeat: RepeatMode,

    /// Seconds into a track after which "previous" restarts it (default: 3)
    pub restart_threshold_secs: f64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            volume: 0.8,
            history_size: 50,
            shuffle: false,
            repeat: RepeatMode::None,
            restart_threshold_secs: 3.0,
        }
    }
}

/// Snapshot of the process-wide playback state
///
/// `is_playing` implies both `current_track_id` and `current_playlist_id`
/// are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Active playlist
    pub current_playlist_id: Option<PlaylistId>,
    /// Track bound to the media handle
    pub current_track_id: Option<TrackId>,
    /// Whether audio is audible right now
    pub is_playing: bool,
    /// Random next/previous selection
    pub is_shuffle: bool,
    /// Repeat mode
    pub repeat_mode: RepeatMode,
    /// Live volume in `[0, 1]`
    pub volume: f64,
    /// Position in the current track
    pub position_seconds: f64,
    /// Recently started tracks, oldest first
    pub play_history: Vec<TrackId>,
}

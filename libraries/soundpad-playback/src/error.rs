//! Error types for playback sequencing

use soundpad_core::{SoundpadError, TrackId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    /// Requested track is not in the active playlist
    #[error("Track not found in playlist: {0}")]
    TrackNotFound(TrackId),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Seek fraction is not a number, or the track duration is unknown
    #[error("Invalid seek position: {0}")]
    InvalidSeek(f64),

    /// Media backend rejected a load or play request
    #[error("Media error: {0}")]
    Media(String),
}

impl PlaybackError {
    /// Create a media error
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

impl From<PlaybackError> for SoundpadError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::TrackNotFound(id) => SoundpadError::not_found("Track", id.as_str()),
            PlaybackError::NoTrackLoaded => SoundpadError::not_found("Track", "current"),
            PlaybackError::InvalidSeek(fraction) => {
                SoundpadError::validation(format!("Invalid seek position: {fraction}"))
            }
            PlaybackError::Media(msg) => SoundpadError::playback(msg),
        }
    }
}

//! Error types for hotkey bindings

use soundpad_core::{SoundpadError, TrackId};
use thiserror::Error;

/// Hotkey errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    /// Key is already bound to another track in the same playlist
    #[error("Key {key} is already bound to track {existing_track_id}")]
    Conflict {
        /// Canonical key descriptor
        key: String,
        /// Track currently holding the key
        existing_track_id: TrackId,
    },

    /// Function key number outside 1..=12
    #[error("Invalid function key number: {0} (expected 1-12)")]
    InvalidFunctionKey(u32),

    /// Key descriptor could not be parsed
    #[error("Invalid key descriptor: {0}")]
    InvalidKey(String),
}

/// Result type for hotkey operations
pub type Result<T> = std::result::Result<T, HotkeyError>;

impl From<HotkeyError> for SoundpadError {
    fn from(err: HotkeyError) -> Self {
        match err {
            HotkeyError::Conflict {
                key,
                existing_track_id,
            } => SoundpadError::Conflict {
                key,
                existing_track_id: existing_track_id.to_string(),
            },
            other => SoundpadError::validation(other.to_string()),
        }
    }
}

/// Core error types for Soundpad
use thiserror::Error;

/// Result type alias using `SoundpadError`
pub type Result<T> = std::result::Result<T, SoundpadError>;

/// Core error type for Soundpad
///
/// `NotFound`, `Conflict` and `Validation` are expected, recoverable
/// conditions that callers report back to the user. `Io`, `Storage` and
/// `Playback` are failures of an external capability.
#[derive(Error, Debug)]
pub enum SoundpadError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity, e.g. `Playlist`
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Hotkey already bound to a different track
    #[error("Key {key} is already bound to track {existing_track_id}")]
    Conflict {
        /// Canonical key descriptor
        key: String,
        /// Track currently holding the key
        existing_track_id: String,
    },

    /// Invalid input (empty names, out-of-range function keys, ...)
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Media backend rejected a load or play request
    #[error("Playback error: {0}")]
    Playback(String),

    /// Durable store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SoundpadError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a playback error
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Whether this error is an expected condition the UI can report
    /// without treating it as a failure of the system.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Conflict { .. } | Self::Validation(_)
        )
    }
}

//! Error types for the importer

use soundpad_core::SoundpadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}

impl From<ImportError> for SoundpadError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Io(e) => SoundpadError::Io(e),
            ImportError::FileNotFound(path) => SoundpadError::not_found("File", path),
            ImportError::InvalidPath(msg) => SoundpadError::validation(msg),
            ImportError::Metadata(msg) => SoundpadError::Io(std::io::Error::other(msg)),
        }
    }
}

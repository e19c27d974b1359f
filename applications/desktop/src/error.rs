/// Host error types
use soundpad_core::SoundpadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] SoundpadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<soundpad_storage::StorageError> for AppError {
    fn from(err: soundpad_storage::StorageError) -> Self {
        AppError::Core(err.into())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

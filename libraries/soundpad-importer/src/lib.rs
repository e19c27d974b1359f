//! Soundpad Importer
//!
//! Finds audio files on disk and turns them into tracks.
//!
//! # Architecture
//!
//! - `scanner`: bounded, cycle-safe breadth-first scan across many roots,
//!   plus the single-folder listing used by "add folder"
//! - `volumes`: platform-specific discovery of scan roots
//! - `metadata`: duration probing from audio headers
//!
//! # Example
//!
//! ```rust,no_run
//! use soundpad_importer::{volumes, FileScanner};
//!
//! # async fn example() {
//! let roots = volumes::enumerate_volumes().await;
//! let found = FileScanner::new().max_results(200).scan(&roots).await;
//! println!("{} mp3 files", found.len());
//! # }
//! ```

mod error;
mod types;

pub mod metadata;
pub mod scanner;
pub mod volumes;

pub use error::ImportError;
pub use scanner::{is_audio_file, scan_folder, FileScanner};
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;

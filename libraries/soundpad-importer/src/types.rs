//! Scan output types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use soundpad_core::Track;
use std::path::PathBuf;

/// Audio file found by a scan
///
/// Ephemeral: consumed to build [`Track`] records, never stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Full path of the file
    pub path: PathBuf,

    /// File name including extension
    pub name: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Modification time, if the platform reports one
    pub last_modified: Option<DateTime<Utc>>,
}

impl ScanResult {
    /// Build a fresh track for this file
    pub fn to_track(&self, id_prefix: &str) -> Track {
        Track::from_path(id_prefix, self.path.clone())
    }
}

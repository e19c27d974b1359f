//! Duration probing from audio headers

use crate::{ImportError, Result};
use lofty::{AudioFile, Probe};
use soundpad_core::Track;
use std::path::{Path, PathBuf};

/// Read the duration of an audio file in seconds
pub fn read_duration(path: &Path) -> Result<f64> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let tagged_file = Probe::open(path)
        .map_err(|e| ImportError::Metadata(format!("Failed to open file: {}", e)))?
        .read()
        .map_err(|e| ImportError::Metadata(format!("Failed to read file: {}", e)))?;

    Ok(tagged_file.properties().duration().as_secs_f64())
}

/// [`read_duration`] on the blocking pool
pub async fn probe_duration(path: PathBuf) -> Result<f64> {
    tokio::task::spawn_blocking(move || read_duration(&path))
        .await
        .map_err(|e| ImportError::Metadata(format!("Probe task failed: {}", e)))?
}

/// Fill in `duration_seconds` for tracks that have none yet
///
/// Probe failures leave the track at 0. Returns the tracks that changed.
pub async fn fill_durations(tracks: &mut [Track]) -> Vec<Track> {
    let mut updated = Vec::new();
    for track in tracks.iter_mut().filter(|t| !t.has_duration()) {
        match probe_duration(track.path.clone()).await {
            Ok(seconds) if seconds > 0.0 => {
                track.duration_seconds = seconds;
                updated.push(track.clone());
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(track = %track.id, error = %e, "Could not probe duration");
            }
        }
    }
    updated
}

//! Headless media backend
//!
//! Validates that the file exists and probes its duration, but produces no
//! sound. Used by the CLI and by tests; a windowed build supplies a real
//! output device through the same trait.

use soundpad_importer::metadata;
use soundpad_playback::{MediaBackend, MediaHandle, PlaybackError, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessBackend;

impl MediaBackend for HeadlessBackend {
    fn load(&self, path: &Path, volume: f64) -> Result<Box<dyn MediaHandle>> {
        if !path.is_file() {
            return Err(PlaybackError::media(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let duration = metadata::read_duration(path).ok().filter(|d| *d > 0.0);
        tracing::debug!(path = %path.display(), ?duration, "Loaded headless handle");

        Ok(Box::new(HeadlessHandle {
            position: 0.0,
            duration,
            volume,
        }))
    }
}

/// Handle whose playhead only moves on seek
#[derive(Debug)]
struct HeadlessHandle {
    position: f64,
    duration: Option<f64>,
    volume: f64,
}

impl MediaHandle for HeadlessHandle {
    fn play(&mut self) -> Result<()> {
        tracing::trace!(position = self.position, volume = self.volume, "Headless play");
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, seconds: f64) -> Result<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(PlaybackError::InvalidSeek(seconds));
        }
        self.position = match self.duration {
            Some(duration) => seconds.min(duration),
            None => seconds,
        };
        Ok(())
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn stop(&mut self) {
        self.position = 0.0;
    }
}

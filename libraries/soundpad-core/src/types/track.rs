/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Artist shown for tracks imported without tag data
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Audio track
///
/// A track is owned by value by whichever playlist or library list
/// contains it. Only the `id` is shared across containers; it is used for
/// hotkey lookups and duplicate detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique, stable track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default = "unknown_artist")]
    pub artist: String,

    /// Album name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Filesystem path or URI
    pub path: PathBuf,

    /// Duration in seconds (0 = unknown / not yet probed)
    #[serde(rename = "duration", alias = "durationSeconds", default)]
    pub duration_seconds: f64,

    /// When the track was added
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

fn unknown_artist() -> String {
    UNKNOWN_ARTIST.to_string()
}

impl Track {
    /// Create a track from a file path
    ///
    /// The title is the file name without its extension; the id is freshly
    /// generated with the given prefix.
    pub fn from_path(id_prefix: &str, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            id: TrackId::generate(id_prefix),
            title: title_from_path(&path),
            artist: unknown_artist(),
            album: None,
            path,
            duration_seconds: 0.0,
            added_at: Utc::now(),
        }
    }

    /// Whether the duration has been probed yet
    pub fn has_duration(&self) -> bool {
        self.duration_seconds > 0.0
    }

    /// Case-insensitive match against title and artist
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query) || self.artist.to_lowercase().contains(&query)
    }
}

/// File stem of `path`, falling back to the full file name
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_file_stem() {
        let track = Track::from_path("track", "/sounds/Air Horn.mp3");
        assert_eq!(track.title, "Air Horn");
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert!(!track.has_duration());
    }

    #[test]
    fn reads_records_without_optional_fields() {
        let raw = r#"{"id":"track_1","title":"Boom","path":"C:\\sfx\\boom.wav"}"#;
        let track: Track = serde_json::from_str(raw).unwrap();
        assert_eq!(track.id.as_str(), "track_1");
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert_eq!(track.duration_seconds, 0.0);
    }

    #[test]
    fn duration_is_stored_under_duration_key() {
        let mut track = Track::from_path("lib", "/a/b.ogg");
        track.duration_seconds = 2.5;
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["duration"], 2.5);
        assert!(json.get("addedAt").is_some());
    }

    #[test]
    fn search_matches_title_or_artist() {
        let mut track = Track::from_path("track", "/a/Sad Trombone.mp3");
        track.artist = "Brass Band".to_string();
        assert!(track.matches("trombone"));
        assert!(track.matches("BRASS"));
        assert!(!track.matches("kazoo"));
    }
}

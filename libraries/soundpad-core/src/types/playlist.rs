/// Playlist domain type
use crate::types::{PlaylistId, Track, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Palette new playlists pick their color from
pub const PLAYLIST_COLORS: &[&str] = &[
    "#8338ec", "#3a86ff", "#ff006e", "#fb5607", "#ffbe0b", "#06d6a0", "#118ab2", "#ef476f",
    "#073b4c", "#540d6e",
];

/// Named, ordered collection of tracks
///
/// Track order determines next/previous sequencing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Display color
    #[serde(default = "default_color")]
    pub color: String,

    /// Tracks in playback order
    #[serde(default)]
    pub tracks: Vec<Track>,

    /// System playlists cannot be deleted
    #[serde(default)]
    pub is_system: bool,

    /// Creation timestamp
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_color() -> String {
    "#8c52ff".to_string()
}

impl Playlist {
    /// Create a new user playlist
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate("playlist"),
            name: name.into(),
            color: color.into(),
            tracks: Vec::new(),
            is_system: false,
            created_at: Utc::now(),
        }
    }

    /// Find a track by id
    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Position of a track in playback order
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Whether the playlist contains a track with this id
    pub fn contains(&self, id: &TrackId) -> bool {
        self.position(id).is_some()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

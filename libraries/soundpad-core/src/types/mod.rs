//! Domain types for Soundpad

mod ids;
mod playlist;
mod track;

pub use ids::{PlaylistId, TrackId};
pub use playlist::{Playlist, PLAYLIST_COLORS};
pub use track::{Track, UNKNOWN_ARTIST};

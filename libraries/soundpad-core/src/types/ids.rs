/// ID types for Soundpad entities
///
/// IDs are opaque strings. Freshly generated IDs carry a readable prefix
/// (`playlist_`, `track_`, `lib_`) followed by a random UUID, but records
/// written by older versions may use any string and are accepted as-is.
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a new random identifier with the given prefix
            pub fn generate(prefix: &str) -> Self {
                Self(format!("{}_{}", prefix, Uuid::new_v4().simple()))
            }

            /// Get the inner string
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Track identifier, stable across playlists and the library
    TrackId
);

string_id!(
    /// Playlist identifier
    PlaylistId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = TrackId::generate("track");
        let b = TrackId::generate("track");
        assert!(a.as_str().starts_with("track_"));
        assert_ne!(a, b);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = PlaylistId::new("playlist_1700000000");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"playlist_1700000000\""
        );
    }
}

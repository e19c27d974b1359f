//! Shuffle selection

use rand::Rng;
use soundpad_core::{Track, TrackId};

/// Pick a uniformly random index, avoiding `current` when possible
///
/// Resamples while the list has more than one track and the pick is the
/// current track. A single-track list always yields index 0.
///
/// `tracks` must not be empty.
pub(crate) fn pick_index<R: Rng + ?Sized>(
    rng: &mut R,
    tracks: &[Track],
    current: Option<&TrackId>,
) -> usize {
    debug_assert!(!tracks.is_empty());
    // Duplicate ids would make the loop unbounded
    let has_other = match current {
        Some(c) => tracks.iter().any(|t| &t.id != c),
        None => true,
    };

    loop {
        let index = rng.gen_range(0..tracks.len());
        if tracks.len() == 1 || !has_other || Some(&tracks[index].id) != current {
            return index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tracks(ids: &[&str]) -> Vec<Track> {
        ids.iter()
            .map(|id| {
                let mut track = Track::from_path("track", format!("/{id}.mp3"));
                track.id = TrackId::new(*id);
                track
            })
            .collect()
    }

    #[test]
    fn never_picks_current_with_two_tracks() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = tracks(&["a", "b"]);
        for _ in 0..200 {
            assert_eq!(pick_index(&mut rng, &list, Some(&TrackId::new("a"))), 1);
        }
    }

    #[test]
    fn single_track_picks_itself() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = tracks(&["a"]);
        assert_eq!(pick_index(&mut rng, &list, Some(&TrackId::new("a"))), 0);
    }

    #[test]
    fn terminates_when_every_entry_is_current() {
        let mut rng = StdRng::seed_from_u64(7);
        let list = tracks(&["a", "a"]);
        assert!(pick_index(&mut rng, &list, Some(&TrackId::new("a"))) < 2);
    }
}

//! Playback history tracking
//!
//! Bounded list of recently started tracks.

use soundpad_core::TrackId;
use std::collections::VecDeque;

/// Play history with bounded size
///
/// Oldest entries are discarded once `max_size` is reached.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = back)
    tracks: VecDeque<TrackId>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record a started track
    pub fn push(&mut self, track: TrackId) {
        if self.max_size == 0 {
            return;
        }
        if self.tracks.len() >= self.max_size {
            self.tracks.pop_front();
        }
        self.tracks.push_back(track);
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&TrackId> {
        self.tracks.back()
    }

    /// Drop every entry for `track`
    pub fn forget(&mut self, track: &TrackId) {
        self.tracks.retain(|t| t != track);
    }

    /// All entries, oldest first
    pub fn to_vec(&self) -> Vec<TrackId> {
        self.tracks.iter().cloned().collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_bounded() {
        let mut history = History::new(3);
        for id in ["1", "2", "3", "4"] {
            history.push(TrackId::new(id));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(
            history.to_vec(),
            vec![TrackId::new("2"), TrackId::new("3"), TrackId::new("4")]
        );
        assert_eq!(history.last(), Some(&TrackId::new("4")));
    }

    #[test]
    fn forget_removes_all_entries() {
        let mut history = History::default();
        history.push(TrackId::new("a"));
        history.push(TrackId::new("b"));
        history.push(TrackId::new("a"));

        history.forget(&TrackId::new("a"));

        assert_eq!(history.to_vec(), vec![TrackId::new("b")]);
    }

    #[test]
    fn zero_size_keeps_nothing() {
        let mut history = History::new(0);
        history.push(TrackId::new("a"));
        assert!(history.is_empty());
    }
}

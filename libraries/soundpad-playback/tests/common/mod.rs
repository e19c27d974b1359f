//! Shared fixtures for sequencer tests

#![allow(dead_code)]

use soundpad_core::{Playlist, PlaylistId, Track, TrackId};
use soundpad_playback::{
    MediaBackend, MediaHandle, PlaybackError, PlaybackSequencer, Result, SequencerConfig,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Observable state of one mock handle
#[derive(Debug, Clone, Default)]
pub struct HandleState {
    pub path: PathBuf,
    pub playing: bool,
    pub stopped: bool,
    pub position: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    fail_play: bool,
    fail_seek: bool,
}

#[derive(Default)]
struct Shared {
    fail_load: HashSet<PathBuf>,
    fail_play: HashSet<PathBuf>,
    handles: Vec<Arc<Mutex<HandleState>>>,
}

/// Backend that records every handle it hands out
#[derive(Clone, Default)]
pub struct MockBackend {
    shared: Arc<Mutex<Shared>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `load` fail for this path
    pub fn fail_load(&self, path: impl Into<PathBuf>) {
        self.shared.lock().unwrap().fail_load.insert(path.into());
    }

    /// Make `play` fail for handles on this path
    pub fn fail_play(&self, path: impl Into<PathBuf>) {
        self.shared.lock().unwrap().fail_play.insert(path.into());
    }

    /// Number of successful loads
    pub fn loads(&self) -> usize {
        self.shared.lock().unwrap().handles.len()
    }

    /// Snapshot of the most recently loaded handle
    pub fn last(&self) -> HandleState {
        self.handle(self.loads() - 1)
    }

    /// Snapshot of the n-th loaded handle
    pub fn handle(&self, index: usize) -> HandleState {
        self.shared.lock().unwrap().handles[index].lock().unwrap().clone()
    }

    /// Move the most recent handle's playhead
    pub fn set_position(&self, seconds: f64) {
        let shared = self.shared.lock().unwrap();
        shared.handles.last().unwrap().lock().unwrap().position = seconds;
    }

    /// Make `seek` fail on the most recent handle
    pub fn fail_seek(&self) {
        let shared = self.shared.lock().unwrap();
        shared.handles.last().unwrap().lock().unwrap().fail_seek = true;
    }

    /// Handles that have not been stopped
    pub fn live_handles(&self) -> usize {
        self.shared
            .lock()
            .unwrap()
            .handles
            .iter()
            .filter(|h| !h.lock().unwrap().stopped)
            .count()
    }
}

impl MediaBackend for MockBackend {
    fn load(&self, path: &Path, volume: f64) -> Result<Box<dyn MediaHandle>> {
        let mut shared = self.shared.lock().unwrap();
        if shared.fail_load.contains(path) {
            return Err(PlaybackError::media(format!("cannot open {}", path.display())));
        }
        let state = Arc::new(Mutex::new(HandleState {
            path: path.to_path_buf(),
            duration: Some(10.0),
            volume,
            fail_play: shared.fail_play.contains(path),
            ..HandleState::default()
        }));
        shared.handles.push(state.clone());
        Ok(Box::new(MockHandle { state }))
    }
}

struct MockHandle {
    state: Arc<Mutex<HandleState>>,
}

impl MediaHandle for MockHandle {
    fn play(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_play {
            return Err(PlaybackError::media("output device busy"));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().playing = false;
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_seek {
            return Err(PlaybackError::media("stream is not seekable"));
        }
        state.position = seconds;
        Ok(())
    }

    fn position(&self) -> f64 {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<f64> {
        self.state.lock().unwrap().duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.state.lock().unwrap().volume = volume;
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.stopped = true;
    }
}

/// Playlist `p` with tracks whose ids and file stems are `ids`
pub fn playlist(ids: &[&str]) -> Playlist {
    let mut playlist = Playlist::new("Test", "#3a86ff");
    playlist.id = PlaylistId::new("p");
    for id in ids {
        let mut track = Track::from_path("track", format!("/sfx/{id}.mp3"));
        track.id = TrackId::new(*id);
        playlist.tracks.push(track);
    }
    playlist
}

pub fn path_of(id: &str) -> PathBuf {
    PathBuf::from(format!("/sfx/{id}.mp3"))
}

pub fn id(s: &str) -> TrackId {
    TrackId::new(s)
}

pub fn sequencer(backend: &MockBackend, config: SequencerConfig) -> PlaybackSequencer {
    PlaybackSequencer::with_seed(Box::new(backend.clone()), config, 42)
}

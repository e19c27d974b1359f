//! Playback sequencing state machine

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::history::History;
use crate::media::{MediaBackend, MediaEvent, MediaHandle};
use crate::shuffle;
use crate::types::{PlaybackState, RepeatMode, SequencerConfig};
use crate::volume::Volume;
use rand::rngs::StdRng;
use rand::SeedableRng;
use soundpad_core::{Playlist, PlaylistId, Track, TrackId};

/// Decides which track plays on play / next / previous / end-of-track
///
/// The sequencer exclusively owns the single active media handle. Every
/// navigation call takes the active playlist as it is right now, so edits
/// to the playlist are picked up without a separate sync step.
pub struct PlaybackSequencer {
    backend: Box<dyn MediaBackend>,
    handle: Option<Box<dyn MediaHandle>>,

    // State
    current_playlist: Option<PlaylistId>,
    current_track: Option<TrackId>,
    is_playing: bool,

    // Settings
    shuffle: bool,
    repeat: RepeatMode,
    volume: Volume,
    restart_threshold_secs: f64,

    history: History,
    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSequencer {
    /// Create a sequencer with an entropy-seeded shuffle source
    pub fn new(backend: Box<dyn MediaBackend>, config: SequencerConfig) -> Self {
        Self::with_rng(backend, config, StdRng::from_entropy())
    }

    /// Create a sequencer with a fixed shuffle seed
    pub fn with_seed(backend: Box<dyn MediaBackend>, config: SequencerConfig, seed: u64) -> Self {
        Self::with_rng(backend, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(backend: Box<dyn MediaBackend>, config: SequencerConfig, rng: StdRng) -> Self {
        Self {
            backend,
            handle: None,
            current_playlist: None,
            current_track: None,
            is_playing: false,
            shuffle: config.shuffle,
            repeat: config.repeat,
            volume: Volume::new(config.volume),
            restart_threshold_secs: config.restart_threshold_secs,
            history: History::new(config.history_size),
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Make `playlist` the active one without starting playback
    pub fn select_playlist(&mut self, playlist: &PlaylistId) {
        self.current_playlist = Some(playlist.clone());
    }

    /// Play `track_id` from `playlist`
    ///
    /// If the track is already current this toggles play/pause instead of
    /// restarting it.
    ///
    /// # Errors
    ///
    /// - [`PlaybackError::TrackNotFound`] if the playlist does not contain
    ///   the track. Nothing changes.
    /// - [`PlaybackError::Media`] if the backend cannot load the track (the
    ///   previous track keeps playing) or cannot start it (playback is
    ///   cleared: no current track, not playing).
    pub fn play(&mut self, playlist: &Playlist, track_id: &TrackId) -> Result<()> {
        let track = playlist
            .track(track_id)
            .ok_or_else(|| PlaybackError::TrackNotFound(track_id.clone()))?;

        if self.current_track.as_ref() == Some(track_id) && self.handle.is_some() {
            self.current_playlist = Some(playlist.id.clone());
            return self.toggle();
        }

        self.start(playlist, track)
    }

    /// Flip between playing and paused
    ///
    /// Does nothing when no track is loaded.
    pub fn toggle(&mut self) -> Result<()> {
        let Some(handle) = self.handle.as_mut() else {
            tracing::debug!("Toggle ignored: no track loaded");
            return Ok(());
        };

        if self.is_playing {
            handle.pause();
            self.set_playing(false);
        } else {
            handle.play()?;
            self.set_playing(true);
        }
        Ok(())
    }

    /// Stop playback and release the media handle
    ///
    /// The current track is cleared; the active playlist is kept.
    pub fn stop(&mut self) {
        self.release_handle();
        self.set_current(None);
        self.set_playing(false);
    }

    /// Advance to the next track
    ///
    /// Ordered mode moves to the following track; past the end it wraps
    /// under `RepeatMode::All` and otherwise pauses at position 0 with the
    /// last track still current. Shuffle picks a random other track.
    pub fn next(&mut self, playlist: &Playlist) -> Result<()> {
        let Some(current) = self.current_track.clone() else {
            tracing::debug!("Next ignored: no current track");
            return Ok(());
        };
        if playlist.is_empty() {
            return Ok(());
        }

        let target = if self.shuffle {
            shuffle::pick_index(&mut self.rng, &playlist.tracks, Some(&current))
        } else {
            let next = playlist.position(&current).map_or(0, |i| i + 1);
            if next < playlist.len() {
                next
            } else if self.repeat == RepeatMode::All {
                0
            } else {
                tracing::debug!(track = %current, "End of playlist");
                return self.stop_at_end();
            }
        };

        self.go_to(playlist, target)
    }

    /// Go back
    ///
    /// More than the restart threshold (3 s) into a track, restarts it.
    /// Otherwise shuffle picks a random other track, and ordered mode moves
    /// to the preceding track; before the first it wraps under
    /// `RepeatMode::All` and otherwise restarts the current track.
    pub fn previous(&mut self, playlist: &Playlist) -> Result<()> {
        let Some(current) = self.current_track.clone() else {
            tracing::debug!("Previous ignored: no current track");
            return Ok(());
        };

        if self.position() > self.restart_threshold_secs {
            return self.rewind();
        }
        if playlist.is_empty() {
            return Ok(());
        }

        let target = if self.shuffle {
            shuffle::pick_index(&mut self.rng, &playlist.tracks, Some(&current))
        } else {
            match playlist.position(&current) {
                Some(i) if i > 0 => i - 1,
                _ if self.repeat == RepeatMode::All => playlist.len() - 1,
                _ => return self.rewind(),
            }
        };

        self.go_to(playlist, target)
    }

    /// Handle natural end of the current track
    ///
    /// `RepeatMode::One` replays the track; every other mode behaves like
    /// [`next`](Self::next).
    pub fn on_track_end(&mut self, playlist: &Playlist) -> Result<()> {
        let Some(current) = self.current_track.clone() else {
            return Ok(());
        };
        self.emit(PlaybackEvent::TrackFinished { track_id: current });

        if self.repeat == RepeatMode::One {
            return self.replay();
        }
        self.next(playlist)
    }

    /// Route a notification from the media handle
    pub fn on_media_event(&mut self, playlist: Option<&Playlist>, event: MediaEvent) -> Result<()> {
        match event {
            MediaEvent::Progress { position, duration } => {
                self.emit(PlaybackEvent::Progress { position, duration });
                Ok(())
            }
            MediaEvent::Ended => match playlist {
                Some(playlist) => self.on_track_end(playlist),
                None => {
                    self.stop();
                    Ok(())
                }
            },
            MediaEvent::Error(message) => {
                tracing::error!(error = %message, "Media failure during playback");
                self.stop();
                self.emit(PlaybackEvent::Error { message });
                Ok(())
            }
        }
    }

    // ===== Seek =====

    /// Seek to a fraction of the track duration
    ///
    /// The fraction is clamped into `[0, 1]`.
    pub fn seek(&mut self, fraction: f64) -> Result<()> {
        let handle = self.handle.as_mut().ok_or(PlaybackError::NoTrackLoaded)?;
        if fraction.is_nan() {
            return Err(PlaybackError::InvalidSeek(fraction));
        }
        let duration = handle
            .duration()
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or(PlaybackError::InvalidSeek(fraction))?;

        handle.seek(fraction.clamp(0.0, 1.0) * duration)
    }

    /// Jump back to position 0 without changing play/pause
    pub fn rewind(&mut self) -> Result<()> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(());
        };
        handle.seek(0.0)?;
        if let Some(track_id) = self.current_track.clone() {
            self.emit(PlaybackEvent::Restarted { track_id });
        }
        Ok(())
    }

    /// Jump back to position 0 and make sure the track is playing
    pub fn replay(&mut self) -> Result<()> {
        self.rewind()?;
        if let Some(handle) = self.handle.as_mut() {
            handle.play()?;
            self.set_playing(true);
        }
        Ok(())
    }

    // ===== Shuffle & Repeat =====

    /// Enable or disable shuffle
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle != enabled {
            self.shuffle = enabled;
            self.emit(PlaybackEvent::ShuffleChanged { enabled });
        }
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        if self.repeat != mode {
            self.repeat = mode;
            self.emit(PlaybackEvent::RepeatChanged { mode });
        }
    }

    /// Advance the repeat mode one step (None -> All -> One -> None)
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.set_repeat(self.repeat.cycle());
        self.repeat
    }

    // ===== Volume =====

    /// Change the live volume, applying it to the current handle
    pub fn set_volume(&mut self, volume: f64) {
        let volume = self.volume.set_live(volume);
        if let Some(handle) = self.handle.as_mut() {
            handle.set_volume(volume);
        }
        self.emit(PlaybackEvent::VolumeChanged { volume });
    }

    /// Mark the live volume as saved and return it for persisting
    pub fn commit_volume(&mut self) -> f64 {
        self.volume.commit()
    }

    // ===== Track lifecycle =====

    /// Forget a deleted track
    ///
    /// If it is the current track, playback stops and the current track is
    /// cleared before this returns. Returns whether playback was cleared.
    pub fn remove_track(&mut self, track_id: &TrackId) -> bool {
        self.history.forget(track_id);
        if self.current_track.as_ref() != Some(track_id) {
            return false;
        }
        tracing::info!(track = %track_id, "Current track deleted, stopping playback");
        self.stop();
        true
    }

    /// Forget a deleted playlist, stopping playback if it was active
    pub fn remove_playlist(&mut self, playlist: &PlaylistId) {
        if self.current_playlist.as_ref() == Some(playlist) {
            self.stop();
            self.current_playlist = None;
        }
    }

    // ===== State Queries =====

    /// Snapshot of the playback state
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_playlist_id: self.current_playlist.clone(),
            current_track_id: self.current_track.clone(),
            is_playing: self.is_playing,
            is_shuffle: self.shuffle,
            repeat_mode: self.repeat,
            volume: self.volume.live(),
            position_seconds: self.position(),
            play_history: self.history.to_vec(),
        }
    }

    /// Active playlist
    pub fn current_playlist(&self) -> Option<&PlaylistId> {
        self.current_playlist.as_ref()
    }

    /// Current track
    pub fn current_track(&self) -> Option<&TrackId> {
        self.current_track.as_ref()
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Shuffle flag
    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    /// Repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Live volume
    pub fn volume(&self) -> f64 {
        self.volume.live()
    }

    /// Position in the current track, 0 when nothing is loaded
    pub fn position(&self) -> f64 {
        self.handle.as_ref().map_or(0.0, |h| h.position())
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn go_to(&mut self, playlist: &Playlist, index: usize) -> Result<()> {
        let track = &playlist.tracks[index];
        if self.current_track.as_ref() == Some(&track.id) && self.handle.is_some() {
            return self.replay();
        }
        self.start(playlist, track)
    }

    fn start(&mut self, playlist: &Playlist, track: &Track) -> Result<()> {
        let mut handle = match self.backend.load(&track.path, self.volume.live()) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(track = %track.id, path = %track.path.display(), error = %e, "Failed to load track");
                self.emit(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                return Err(e);
            }
        };

        self.release_handle();
        self.current_playlist = Some(playlist.id.clone());
        self.set_current(Some(track.id.clone()));

        if let Err(e) = handle.play() {
            tracing::error!(track = %track.id, error = %e, "Failed to start track");
            handle.stop();
            self.set_current(None);
            self.set_playing(false);
            self.emit(PlaybackEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }

        self.handle = Some(handle);
        self.history.push(track.id.clone());
        self.set_playing(true);
        tracing::info!(track = %track.id, title = %track.title, "Playing");
        Ok(())
    }

    fn stop_at_end(&mut self) -> Result<()> {
        let Some(handle) = self.handle.as_mut() else {
            self.set_playing(false);
            return Ok(());
        };
        handle.pause();
        let rewound = handle.seek(0.0);
        self.set_playing(false);
        rewound
    }

    fn release_handle(&mut self) {
        if let Some(mut old) = self.handle.take() {
            old.stop();
        }
    }

    fn set_current(&mut self, track: Option<TrackId>) {
        if self.current_track != track {
            let previous_track_id = std::mem::replace(&mut self.current_track, track.clone());
            self.emit(PlaybackEvent::TrackChanged {
                track_id: track,
                previous_track_id,
            });
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit(PlaybackEvent::StateChanged {
                is_playing: playing,
            });
        }
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

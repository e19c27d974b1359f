//! Inbound host events and fixed global shortcuts
//!
//! The host registers [`global_shortcuts`] with the OS and turns every
//! press, menu action and media notification into a [`HostEvent`]. Events
//! are handled one at a time by [`Soundpad::handle_event`].

use crate::app_state::Soundpad;
use serde::{Deserialize, Serialize};
use soundpad_core::{Result, SoundpadError, TrackId};
use soundpad_hotkeys::{KeyDescriptor, FUNCTION_KEY_RANGE};
use soundpad_playback::MediaEvent;

/// Actions reachable through a global shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    /// Play or pause playback
    PlayPause,
    /// Skip to next track
    Next,
    /// Go to previous track
    Previous,
    /// Play the track bound to `F<n>` in the current playlist
    PlayHotkey(u32),
}

/// OS-level shortcut; not user-configurable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalShortcut {
    /// Keyboard accelerator (e.g. `CommandOrControl+Alt+P`)
    pub accelerator: String,
    /// Action triggered by this shortcut
    pub action: ShortcutAction,
}

/// The shortcuts registered at startup
///
/// `CommandOrControl` is Command on macOS and Control elsewhere.
pub fn global_shortcuts() -> Vec<GlobalShortcut> {
    let transport = [
        ("CommandOrControl+Alt+P", ShortcutAction::PlayPause),
        ("CommandOrControl+Alt+Right", ShortcutAction::Next),
        ("CommandOrControl+Alt+Left", ShortcutAction::Previous),
    ];

    transport
        .into_iter()
        .map(|(accelerator, action)| GlobalShortcut {
            accelerator: accelerator.to_string(),
            action,
        })
        .chain(FUNCTION_KEY_RANGE.map(|n| GlobalShortcut {
            accelerator: format!("F{n}"),
            action: ShortcutAction::PlayHotkey(n),
        }))
        .collect()
}

/// Something that happened outside the core
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    PlayPause,
    NextTrack,
    PreviousTrack,
    /// Function key `F<n>` pressed globally
    PlayHotkey(u32),
    /// Key pressed while the window has focus
    KeyPressed(KeyDescriptor),
    /// Notification from the media output
    Media(MediaEvent),
}

impl From<ShortcutAction> for HostEvent {
    fn from(action: ShortcutAction) -> Self {
        match action {
            ShortcutAction::PlayPause => Self::PlayPause,
            ShortcutAction::Next => Self::NextTrack,
            ShortcutAction::Previous => Self::PreviousTrack,
            ShortcutAction::PlayHotkey(n) => Self::PlayHotkey(n),
        }
    }
}

impl Soundpad {
    /// Handle one host event to completion
    pub fn handle_event(&mut self, event: HostEvent) -> Result<()> {
        tracing::debug!(?event, "Host event");
        match event {
            HostEvent::PlayPause => self.toggle(),
            HostEvent::NextTrack => self.next(),
            HostEvent::PreviousTrack => self.previous(),
            HostEvent::PlayHotkey(n) => {
                let key = KeyDescriptor::function_key(n)?;
                self.trigger_hotkey(&key).map(drop)
            }
            HostEvent::KeyPressed(key) => self.trigger_hotkey(&key).map(drop),
            HostEvent::Media(event) => self.on_media_event(event),
        }
    }

    /// Play the track bound to `key` in the current playlist
    ///
    /// Pressing the key of the track that is playing restarts it; if that
    /// track is paused it resumes.
    ///
    /// # Errors
    ///
    /// `NotFound` when there is no current playlist, no binding for `key`,
    /// or the bound track is no longer in the playlist.
    pub fn trigger_hotkey(&mut self, key: &KeyDescriptor) -> Result<TrackId> {
        let playlist_id = self
            .sequencer
            .current_playlist()
            .cloned()
            .ok_or_else(|| SoundpadError::not_found("Playlist", "current"))?;
        let playlist = self
            .playlists
            .get(&playlist_id)
            .ok_or_else(|| SoundpadError::not_found("Playlist", playlist_id.as_str()))?;
        let track_id = self
            .hotkeys
            .resolve(&playlist_id, key)
            .cloned()
            .ok_or_else(|| SoundpadError::not_found("Hotkey", key.to_string()))?;
        if !playlist.contains(&track_id) {
            tracing::warn!(key = %key, track = %track_id, "Hotkey bound to a missing track");
            return Err(SoundpadError::not_found("Track", track_id.as_str()));
        }

        let result = if self.sequencer.current_track() == Some(&track_id)
            && self.sequencer.is_playing()
        {
            self.sequencer.rewind()
        } else {
            self.sequencer.play(playlist, &track_id)
        };
        self.flush_events();
        result?;

        tracing::info!(key = %key, track = %track_id, "Hotkey triggered");
        Ok(track_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_cover_transport_and_function_keys() {
        let shortcuts = global_shortcuts();
        assert_eq!(shortcuts.len(), 15);
        assert_eq!(shortcuts[0].accelerator, "CommandOrControl+Alt+P");
        assert_eq!(shortcuts[3].action, ShortcutAction::PlayHotkey(1));
        assert_eq!(shortcuts[14].accelerator, "F12");
    }

    #[test]
    fn actions_map_to_events() {
        assert_eq!(HostEvent::from(ShortcutAction::Next), HostEvent::NextTrack);
        assert_eq!(
            HostEvent::from(ShortcutAction::PlayHotkey(7)),
            HostEvent::PlayHotkey(7)
        );
    }
}

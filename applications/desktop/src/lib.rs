//! Soundpad desktop host
//!
//! Wires the library crates into one application:
//!
//! - `config`: layered configuration (defaults, `soundpad.toml`, `SOUNDPAD_*`)
//! - `app_state`: the [`Soundpad`] controller owning playlists, library,
//!   hotkeys and the playback sequencer
//! - `dispatch`: inbound host events and the fixed global shortcuts
//! - `commands`: the never-failing command surface for the UI
//! - `platform`: file dialog and autostart collaborators
//! - `backend`: a headless media backend

pub mod app_state;
pub mod backend;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod platform;

pub use app_state::Soundpad;
pub use config::AppConfig;
pub use dispatch::{global_shortcuts, GlobalShortcut, HostEvent, ShortcutAction};
pub use error::{AppError, Result};

//! Canonical key descriptors
//!
//! A descriptor is the modifier set plus a base key, rendered as
//! `Ctrl+Alt+Shift+Meta+Key` with modifiers always in that order. Parsing
//! accepts modifiers in any order and a few aliases, so two descriptors
//! compare equal exactly when they name the same combination.

use crate::error::{HotkeyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Function keys reachable through `function_key`
pub const FUNCTION_KEY_RANGE: RangeInclusive<u32> = 1..=12;

/// Held modifier keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Modifiers {
    /// Ctrl / Control
    pub ctrl: bool,
    /// Alt / Option
    pub alt: bool,
    /// Shift
    pub shift: bool,
    /// Meta / Cmd / Super
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Whether no modifier is held
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    fn names(self) -> impl Iterator<Item = &'static str> {
        [
            (self.ctrl, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Meta"),
        ]
        .into_iter()
        .filter_map(|(held, name)| held.then_some(name))
    }

    fn set(&mut self, name: &str) -> bool {
        match name.to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "commandorcontrol" => self.ctrl = true,
            "alt" | "option" => self.alt = true,
            "shift" => self.shift = true,
            "meta" | "cmd" | "command" | "super" | "win" => self.meta = true,
            _ => return false,
        }
        true
    }
}

/// A key combination such as `Ctrl+Shift+A` or `F5`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyDescriptor {
    modifiers: Modifiers,
    key: String,
}

impl KeyDescriptor {
    /// Build a descriptor from a modifier set and a base key name
    ///
    /// The base key is normalized: `" "` becomes `Space`, arrow keys become
    /// `↑ ↓ ← →`, `Escape` becomes `Esc`, named keys such as `pageup` get a
    /// fixed spelling (`PageUp`), and single letters are upper-cased.
    /// A base key that is itself a modifier (for example `Shift` pressed on
    /// its own) keeps its name and does not also set the modifier flag.
    pub fn new(modifiers: Modifiers, key: &str) -> Result<Self> {
        let key = normalize_key(key).ok_or_else(|| HotkeyError::InvalidKey(key.to_string()))?;
        let mut modifiers = modifiers;
        match key.as_str() {
            "Ctrl" => modifiers.ctrl = false,
            "Alt" => modifiers.alt = false,
            "Shift" => modifiers.shift = false,
            "Meta" => modifiers.meta = false,
            _ => {}
        }
        Ok(Self { modifiers, key })
    }

    /// Descriptor for function key `F<n>`
    ///
    /// # Errors
    ///
    /// Returns [`HotkeyError::InvalidFunctionKey`] when `n` is outside `1..=12`.
    pub fn function_key(n: u32) -> Result<Self> {
        if !FUNCTION_KEY_RANGE.contains(&n) {
            return Err(HotkeyError::InvalidFunctionKey(n));
        }
        Ok(Self {
            modifiers: Modifiers::NONE,
            key: format!("F{n}"),
        })
    }

    /// Held modifiers
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Normalized base key name
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Function key number if this is an unmodified `F1`..`F12`
    pub fn function_number(&self) -> Option<u32> {
        if !self.modifiers.is_empty() {
            return None;
        }
        let n: u32 = self.key.strip_prefix('F')?.parse().ok()?;
        FUNCTION_KEY_RANGE.contains(&n).then_some(n)
    }
}

fn normalize_key(raw: &str) -> Option<String> {
    if raw == " " {
        return Some("Space".to_string());
    }
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let named = match trimmed.to_ascii_lowercase().as_str() {
        "space" | "spacebar" => "Space",
        "arrowup" | "up" => "↑",
        "arrowdown" | "down" => "↓",
        "arrowleft" | "left" => "←",
        "arrowright" | "right" => "→",
        "escape" | "esc" => "Esc",
        "control" | "ctrl" => "Ctrl",
        "alt" | "option" => "Alt",
        "shift" => "Shift",
        "meta" | "cmd" | "command" | "super" => "Meta",
        "enter" | "return" => "Enter",
        "tab" => "Tab",
        "backspace" => "Backspace",
        "delete" | "del" => "Delete",
        "insert" | "ins" => "Insert",
        "home" => "Home",
        "end" => "End",
        "pageup" | "pgup" => "PageUp",
        "pagedown" | "pgdn" => "PageDown",
        "capslock" => "CapsLock",
        "printscreen" => "PrintScreen",
        "pause" => "Pause",
        _ => "",
    };
    if !named.is_empty() {
        return Some(named.to_string());
    }

    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(c.to_uppercase().collect());
    }

    // f1..f24 style names
    if let Some(rest) = trimmed
        .strip_prefix('F')
        .or_else(|| trimmed.strip_prefix('f'))
    {
        if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
            return Some(format!("F{rest}"));
        }
    }

    Some(trimmed.to_string())
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in self.modifiers.names() {
            write!(f, "{name}+")?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for KeyDescriptor {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self> {
        // A trailing "++" means the base key is "+" itself
        let (prefix, key) = if s == "+" {
            ("", "+")
        } else if let Some(prefix) = s.strip_suffix("++") {
            (prefix, "+")
        } else {
            s.rsplit_once('+').unwrap_or(("", s))
        };

        let mut modifiers = Modifiers::NONE;
        for part in prefix.split('+').filter(|p| !p.trim().is_empty()) {
            if !modifiers.set(part.trim()) {
                return Err(HotkeyError::InvalidKey(s.to_string()));
            }
        }

        Self::new(modifiers, key).map_err(|_| HotkeyError::InvalidKey(s.to_string()))
    }
}

impl TryFrom<String> for KeyDescriptor {
    type Error = HotkeyError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<KeyDescriptor> for String {
    fn from(key: KeyDescriptor) -> Self {
        key.to_string()
    }
}

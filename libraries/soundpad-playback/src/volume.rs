//! Volume control
//!
//! The live level follows the slider while it moves and is applied to the
//! media handle immediately. The saved level only changes on `commit`, so
//! scrubbing does not rewrite the stored preference on every step.

/// Live and saved volume in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    live: f64,
    saved: f64,
}

impl Volume {
    /// Create a volume at `level` (clamped)
    pub fn new(level: f64) -> Self {
        let level = clamp(level);
        Self {
            live: level,
            saved: level,
        }
    }

    /// Level applied to media handles
    pub fn live(&self) -> f64 {
        self.live
    }

    /// Last committed level
    pub fn saved(&self) -> f64 {
        self.saved
    }

    /// Change the live level, returning the clamped value
    pub fn set_live(&mut self, level: f64) -> f64 {
        self.live = clamp(level);
        self.live
    }

    /// Make the live level the saved one
    pub fn commit(&mut self) -> f64 {
        self.saved = self.live;
        self.saved
    }

    /// Whether the live level differs from the saved one
    pub fn is_dirty(&self) -> bool {
        (self.live - self.saved).abs() > f64::EPSILON
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8)
    }
}

fn clamp(level: f64) -> f64 {
    if level.is_nan() {
        return 0.0;
    }
    level.clamp(0.0, 1.0)
}

//! Linear volume level

/// Volume level in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    level: f32,
}

impl Volume {
    /// Create a volume, clamped into range
    pub fn new(level: f32) -> Self {
        let mut volume = Self { level: 0.0 };
        volume.set(level);
        volume
    }

    /// Set the level, clamped into `[0, 1]`
    ///
    /// NaN is ignored. Returns `true` if the stored level changed.
    pub fn set(&mut self, level: f32) -> bool {
        if level.is_nan() {
            return false;
        }
        let level = level.clamp(0.0, 1.0);
        let changed = level != self.level;
        self.level = level;
        changed
    }

    /// Current level
    pub fn level(&self) -> f32 {
        self.level
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.7)
    }
}

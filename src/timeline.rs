use crate::error::{StillreelError, StillreelResult};

pub mod progression;
pub mod sequence;

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Timing knobs for sequence construction.
///
/// Long-pool images hold for a fixed `long_duration`. Short-pool images ramp
/// from `short_start_duration` down (or up) to `short_end_duration` across the
/// timeline; `short_acceleration` warps how fast the ramp moves
/// (see [`progression::progressive_duration`]).
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimingConfig {
    pub long_duration: f64,
    pub short_start_duration: f64,
    pub short_end_duration: f64,
    pub short_acceleration: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            long_duration: 3.0,
            short_start_duration: 0.5,
            short_end_duration: 0.1,
            short_acceleration: 1.0,
        }
    }
}

impl TimingConfig {
    pub fn validate(&self) -> StillreelResult<()> {
        if self.long_duration <= 0.0 {
            return Err(StillreelError::invalid_config(
                "long_duration must be > 0 seconds",
            ));
        }
        if self.short_start_duration <= 0.0 {
            return Err(StillreelError::invalid_config(
                "short_start_duration must be > 0 seconds",
            ));
        }
        if self.short_end_duration <= 0.0 {
            return Err(StillreelError::invalid_config(
                "short_end_duration must be > 0 seconds",
            ));
        }
        if self.short_acceleration <= 0.0 {
            return Err(StillreelError::invalid_config(
                "short_acceleration must be > 0",
            ));
        }
        Ok(())
    }

    /// Short-image display duration at `progress` through the timeline.
    pub fn short_duration_at(&self, progress: f64) -> f64 {
        progression::progressive_duration(
            progress,
            self.short_start_duration,
            self.short_end_duration,
            self.short_acceleration,
        )
    }
}

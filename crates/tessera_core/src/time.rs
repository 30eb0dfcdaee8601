//! Frame timing
//!
//! Variable-rate frames scaled by a time scale, with a fixed step for physics.

use std::time::Duration;

/// Fixed physics step rate (60 Hz)
pub const FIXED_RATE_HZ: u32 = 60;
pub const FIXED_TIMESTEP: f32 = 1.0 / FIXED_RATE_HZ as f32;

/// Most fixed steps a single frame may owe. Backlog past this is dropped.
pub const MAX_FIXED_STEPS: u32 = 8;

/// Frame time tracker
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_count: u64,
    delta: f32,
    elapsed: Duration,
    time_scale: f32,
    fixed_timestep: f32,
    fixed_accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            delta: 0.0,
            elapsed: Duration::ZERO,
            time_scale: 1.0,
            fixed_timestep: FIXED_TIMESTEP,
            fixed_accumulator: 0.0,
        }
    }

    /// Clock with a custom fixed step. Non-positive steps fall back to the default.
    pub fn with_fixed_timestep(step: f32) -> Self {
        let mut clock = Self::new();
        if step > 0.0 {
            clock.fixed_timestep = step;
        }
        clock
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Scaled delta of the last frame, in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Negative scales clamp to zero. Non-finite scales are ignored.
    pub fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.time_scale = scale.max(0.0);
        } else {
            tracing::warn!(scale, "ignoring non-finite time scale");
        }
    }

    /// Advance by a raw frame duration and return how many fixed steps are due.
    ///
    /// Non-finite deltas count as zero. At most [`MAX_FIXED_STEPS`] are
    /// returned per frame.
    pub fn advance(&mut self, raw_delta: f32) -> u32 {
        self.frame_count += 1;
        let raw_delta = if raw_delta.is_finite() { raw_delta.max(0.0) } else { 0.0 };
        self.delta = raw_delta * self.time_scale;
        if !self.delta.is_finite() {
            self.delta = f32::MAX;
        }
        let step = Duration::try_from_secs_f32(self.delta).unwrap_or(Duration::MAX);
        self.elapsed = self.elapsed.saturating_add(step);
        self.fixed_accumulator += self.delta;

        let mut steps = 0;
        while self.fixed_accumulator >= self.fixed_timestep && steps < MAX_FIXED_STEPS {
            self.fixed_accumulator -= self.fixed_timestep;
            steps += 1;
        }
        if steps == MAX_FIXED_STEPS && self.fixed_accumulator >= self.fixed_timestep {
            tracing::debug!(
                backlog = self.fixed_accumulator,
                "dropping fixed-step backlog"
            );
            self.fixed_accumulator = 0.0;
        }
        steps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//! Script-side random numbers.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tessera_core::glam::Vec3;

/// Seedable generator handed to scripts through `ScriptContext::random`.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// Uniform in `[0, 1)`.
    pub fn float(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform in `[0, 1)`.
    pub fn double(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Each component uniform in `[0, 1)`.
    pub fn vec3(&mut self) -> Vec3 {
        Vec3::new(self.float(), self.float(), self.float())
    }

    /// `1.0` or `-1.0` with equal probability.
    pub fn sign(&mut self) -> f32 {
        if self.rng.gen::<bool>() {
            1.0
        } else {
            -1.0
        }
    }

    /// Uniform in `[min, max)`; `min` when the range is empty or a bound is
    /// not finite.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            return min;
        }
        let t = self.float();
        let span = max - min;
        let value = if span.is_finite() {
            min + t * span
        } else {
            min * (1.0 - t) + max * t
        };
        if value < max {
            value
        } else {
            min
        }
    }

    /// Uniform in `[min, max)`; `min` when the range is empty.
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::from_entropy()
    }
}

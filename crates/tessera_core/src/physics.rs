//! Physics enums shared by scripts and the engine.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// How a force applied to a rigidbody is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ForceMode {
    #[default]
    Force = 0,
    Impulse = 1,
    VelocityChange = 2,
    Acceleration = 3,
}

/// Bit set of locked rigidbody axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxisLock(pub u8);

impl AxisLock {
    pub const NONE: Self = Self(0);
    pub const TRANSLATION_X: Self = Self(1 << 0);
    pub const TRANSLATION_Y: Self = Self(1 << 1);
    pub const TRANSLATION_Z: Self = Self(1 << 2);
    pub const TRANSLATION: Self = Self(0b0000_0111);
    pub const ROTATION_X: Self = Self(1 << 3);
    pub const ROTATION_Y: Self = Self(1 << 4);
    pub const ROTATION_Z: Self = Self(1 << 5);
    pub const ROTATION: Self = Self(0b0011_1000);

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for AxisLock {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AxisLock {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Collision layer filter for physics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: Self = Self(u32::MAX);

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self(1)
    }
}

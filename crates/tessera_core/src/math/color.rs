//! Linear RGBA color.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use std::ops::{Add, Mul, Sub};

/// RGBA color with `f32` channels, laid out `(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const ZERO: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const ONE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::rgba(0.0, 0.0, 1.0, 1.0);
    pub const CYAN: Color = Color::rgba(0.0, 1.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgba(1.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::rgba(1.0, 1.0, 0.0, 1.0);
    pub const ORANGE: Color = Color::rgba(1.0, 0.65, 0.0, 1.0);

    /// Build a color from channels, accepting either unit or byte scale.
    ///
    /// Any of `r`, `g`, `b` above `1.0` is treated as a `0..=255` byte value
    /// and divided by 255. Alpha is taken as-is.
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        fn unit(channel: f32) -> f32 {
            if channel <= 1.0 {
                channel
            } else {
                channel / 255.0
            }
        }
        Self::rgba(unit(r), unit(g), unit(b), a)
    }

    /// Build a color from unit-scale channels without any rescaling.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Gray with the same value in all three color channels.
    #[must_use]
    pub const fn gray(rgb: f32, a: f32) -> Self {
        Self::rgba(rgb, rgb, rgb, a)
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::rgba(f(self.r), f(self.g), f(self.b), f(self.a))
    }

    fn zip(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::rgba(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, scalar: f32) -> Color {
        self.map(|c| c * scalar)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, color: Color) -> Color {
        color * self
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Color {
        self.zip(other, |a, b| a * b)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        self.zip(other, |a, b| a + b)
    }
}

impl Add<f32> for Color {
    type Output = Color;

    fn add(self, scalar: f32) -> Color {
        self.map(|c| c + scalar)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Color {
        self.zip(other, |a, b| a - b)
    }
}

impl Sub<f32> for Color {
    type Output = Color;

    fn sub(self, scalar: f32) -> Color {
        self.map(|c| c - scalar)
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Color::rgba(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rescales_byte_channels() {
        let c = Color::new(255.0, 0.5, 51.0, 1.0);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.5);
        assert!((c.b - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_new_keeps_alpha_unscaled() {
        let c = Color::new(0.0, 0.0, 0.0, 128.0);
        assert_eq!(c.a, 128.0);
    }

    #[test]
    fn test_scalar_ops() {
        let c = Color::gray(0.5, 1.0) * 2.0;
        assert_eq!(c, Color::rgba(1.0, 1.0, 1.0, 2.0));
        assert_eq!(2.0 * Color::gray(0.5, 1.0), c);
        assert_eq!(Color::ZERO + 0.25, Color::rgba(0.25, 0.25, 0.25, 0.25));
        assert_eq!(Color::ONE - 1.0, Color::ZERO);
    }

    #[test]
    fn test_componentwise_ops() {
        assert_eq!(Color::RED * Color::YELLOW, Color::RED);
        assert_eq!(Color::RED + Color::BLUE, Color::MAGENTA + Color::rgba(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Color::WHITE - Color::CYAN, Color::rgba(1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_vec4_conversion() {
        let v: Vec4 = Color::ORANGE.into();
        assert_eq!(Color::from(v), Color::ORANGE);
    }
}

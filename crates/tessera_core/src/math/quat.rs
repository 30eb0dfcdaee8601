//! Quaternion helpers matching the engine's rotation conventions.

use glam::{Quat, Vec3};

/// Build a rotation from Euler angles in radians.
///
/// `x` is pitch, `y` is heading and `z` is bank, composed the way the engine
/// composes transform rotations.
#[must_use]
pub fn quat_from_euler(euler: Vec3) -> Quat {
    let (sp, cp) = (euler.x * 0.5).sin_cos();
    let (sh, ch) = (euler.y * 0.5).sin_cos();
    let (sb, cb) = (euler.z * 0.5).sin_cos();

    Quat::from_xyzw(
        ch * sp * cb + sh * cp * sb,
        sh * cp * cb - ch * sp * sb,
        ch * cp * sb - sh * sp * cb,
        ch * cp * cb + sh * sp * sb,
    )
}

/// Inverse of [`quat_from_euler`].
#[must_use]
pub fn euler_from_quat(q: Quat) -> Vec3 {
    let [x, y, z, w] = q.to_array();
    let pitch = (-2.0 * (y * z - w * x)).clamp(-1.0, 1.0).asin();
    let heading = (2.0 * (x * z + w * y)).atan2(1.0 - 2.0 * (x * x + y * y));
    let bank = (2.0 * (x * y + w * z)).atan2(1.0 - 2.0 * (x * x + z * z));
    Vec3::new(pitch, heading, bank)
}

/// Basis vectors of a rotation.
pub trait QuatExt {
    fn right(&self) -> Vec3;
    fn up(&self) -> Vec3;
    fn forward(&self) -> Vec3;
}

impl QuatExt for Quat {
    fn right(&self) -> Vec3 {
        let [x, y, z, w] = self.to_array();
        Vec3::new(
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y + w * z),
            2.0 * (x * z - w * y),
        )
        .normalize_or_zero()
    }

    fn up(&self) -> Vec3 {
        let [x, y, z, w] = self.to_array();
        Vec3::new(
            2.0 * (x * y - w * z),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z + w * x),
        )
        .normalize_or_zero()
    }

    fn forward(&self) -> Vec3 {
        let [x, y, z, w] = self.to_array();
        Vec3::new(
            2.0 * (x * z + w * y),
            2.0 * (y * z - w * x),
            1.0 - 2.0 * (x * x + y * y),
        )
        .normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_zero_euler_is_identity() {
        assert_eq!(quat_from_euler(Vec3::ZERO), Quat::IDENTITY);
    }

    #[test]
    fn test_euler_round_trip() {
        let euler = Vec3::new(0.3, -0.7, 0.2);
        assert!(approx(euler_from_quat(quat_from_euler(euler)), euler));
    }

    #[test]
    fn test_identity_basis() {
        let q = Quat::IDENTITY;
        assert_eq!(q.right(), Vec3::X);
        assert_eq!(q.up(), Vec3::Y);
        assert_eq!(q.forward(), Vec3::Z);
    }

    #[test]
    fn test_heading_turns_forward_toward_x() {
        let q = quat_from_euler(Vec3::new(0.0, FRAC_PI_2, 0.0));
        assert!(approx(q.forward(), Vec3::X));
        assert!(approx(q.up(), Vec3::Y));
    }

    #[test]
    fn test_euler_from_glam_rotation() {
        let q = Quat::from_rotation_y(FRAC_PI_2);
        assert!(approx(euler_from_quat(q), Vec3::new(0.0, FRAC_PI_2, 0.0)));
        assert!(approx(q.right(), -Vec3::Z));
    }
}

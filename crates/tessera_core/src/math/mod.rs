//! Math value types
//!
//! Re-exports glam for vectors, matrices and quaternions, and adds the value
//! types scripts exchange with the engine.

mod color;
pub mod mathf;
mod quat;
mod transform;

pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use color::Color;
pub use quat::{euler_from_quat, quat_from_euler, QuatExt};
pub use transform::Transform;

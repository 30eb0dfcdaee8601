use tessera_core::glam::Vec3;
use tessera_core::math::QuatExt;
use tessera_core::Transform;
use tessera_native::{ComponentCommand, ComponentField};

use super::define_component;

define_component!(
    /// Position, rotation (Euler radians) and scale of an entity.
    TransformComponent,
    Transform
);

impl TransformComponent {
    /// Transform relative to the parent.
    pub fn local(&self) -> Transform {
        self.binding.transform(ComponentField::TransformLocal)
    }

    pub fn set_local(&self, transform: Transform) {
        self.binding.set(ComponentField::TransformLocal, transform);
    }

    /// Transform in world space, composed through all parents.
    pub fn world(&self) -> Transform {
        self.binding.transform(ComponentField::TransformWorld)
    }

    pub fn position(&self) -> Vec3 {
        self.binding.vec3(ComponentField::TransformPosition)
    }

    pub fn set_position(&self, position: Vec3) {
        self.binding.set(ComponentField::TransformPosition, position);
    }

    pub fn rotation(&self) -> Vec3 {
        self.binding.vec3(ComponentField::TransformRotation)
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        self.binding.set(ComponentField::TransformRotation, rotation);
    }

    pub fn scale(&self) -> Vec3 {
        self.binding.vec3(ComponentField::TransformScale)
    }

    pub fn set_scale(&self, scale: Vec3) {
        self.binding.set(ComponentField::TransformScale, scale);
    }

    pub fn forward(&self) -> Vec3 {
        self.local().rotation_quat().forward()
    }

    pub fn right(&self) -> Vec3 {
        self.local().rotation_quat().right()
    }

    pub fn up(&self) -> Vec3 {
        self.local().rotation_quat().up()
    }

    pub fn translate(&self, translation: Vec3) {
        self.binding
            .command(ComponentCommand::Translate(translation.into()));
    }

    pub fn rotate(&self, rotation: Vec3) {
        self.binding.command(ComponentCommand::Rotate(rotation.into()));
    }

    /// Orbit around `point` on `axis` by `angle` radians.
    pub fn rotate_around(&self, point: Vec3, axis: Vec3, angle: f32) {
        self.binding.command(ComponentCommand::RotateAround {
            point: point.into(),
            axis: axis.into(),
            angle,
        });
    }

    pub fn look_at(&self, target: Vec3) {
        self.look_at_with_up(target, Vec3::Y);
    }

    pub fn look_at_with_up(&self, target: Vec3, up: Vec3) {
        self.binding.command(ComponentCommand::LookAt {
            target: target.into(),
            up: up.into(),
        });
    }
}

use tessera_core::glam::Vec3;
use tessera_core::{AxisLock, ForceMode};
use tessera_native::{ComponentCommand, ComponentField};

use super::define_component;

define_component!(RigidbodyComponent, Rigidbody);

impl RigidbodyComponent {
    pub fn mass(&self) -> f32 {
        self.binding.float(ComponentField::RigidbodyMass)
    }

    pub fn set_mass(&self, mass: f32) {
        self.binding.set(ComponentField::RigidbodyMass, mass);
    }

    pub fn use_gravity(&self) -> bool {
        self.binding.bool(ComponentField::RigidbodyUseGravity)
    }

    pub fn set_use_gravity(&self, enabled: bool) {
        self.binding.set(ComponentField::RigidbodyUseGravity, enabled);
    }

    pub fn drag(&self) -> f32 {
        self.binding.float(ComponentField::RigidbodyDrag)
    }

    pub fn set_drag(&self, drag: f32) {
        self.binding.set(ComponentField::RigidbodyDrag, drag);
    }

    pub fn angular_drag(&self) -> f32 {
        self.binding.float(ComponentField::RigidbodyAngularDrag)
    }

    pub fn set_angular_drag(&self, drag: f32) {
        self.binding.set(ComponentField::RigidbodyAngularDrag, drag);
    }

    pub fn velocity(&self) -> Vec3 {
        self.binding.vec3(ComponentField::RigidbodyVelocity)
    }

    pub fn set_velocity(&self, velocity: Vec3) {
        self.binding.set(ComponentField::RigidbodyVelocity, velocity);
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.binding.vec3(ComponentField::RigidbodyAngularVelocity)
    }

    pub fn set_angular_velocity(&self, velocity: Vec3) {
        self.binding.set(ComponentField::RigidbodyAngularVelocity, velocity);
    }

    pub fn position(&self) -> Vec3 {
        self.binding.vec3(ComponentField::RigidbodyPosition)
    }

    pub fn set_position(&self, position: Vec3) {
        self.binding.set(ComponentField::RigidbodyPosition, position);
    }

    pub fn rotation(&self) -> Vec3 {
        self.binding.vec3(ComponentField::RigidbodyRotation)
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        self.binding.set(ComponentField::RigidbodyRotation, rotation);
    }

    pub fn constraints(&self) -> AxisLock {
        self.binding.axes(ComponentField::RigidbodyConstraints)
    }

    pub fn set_constraints(&self, constraints: AxisLock) {
        self.binding.set(ComponentField::RigidbodyConstraints, constraints);
    }

    pub fn add_force(&self, force: Vec3, mode: ForceMode) {
        self.binding.command(ComponentCommand::AddForce {
            force: force.into(),
            mode,
        });
    }

    pub fn add_force_at_position(&self, force: Vec3, position: Vec3, mode: ForceMode) {
        self.binding.command(ComponentCommand::AddForceAtPosition {
            force: force.into(),
            position: position.into(),
            mode,
        });
    }

    pub fn add_torque(&self, torque: Vec3, mode: ForceMode) {
        self.binding.command(ComponentCommand::AddTorque {
            torque: torque.into(),
            mode,
        });
    }

    /// Move the body without sweeping through the space in between.
    pub fn teleport(&self, position: Vec3, rotation: Vec3) {
        self.binding.command(ComponentCommand::Teleport {
            position: position.into(),
            rotation: rotation.into(),
        });
    }
}

define_component!(CharacterControllerComponent, CharacterController);

impl CharacterControllerComponent {
    pub fn step_offset(&self) -> f32 {
        self.binding.float(ComponentField::CharacterControllerStepOffset)
    }

    pub fn set_step_offset(&self, offset: f32) {
        self.binding
            .set(ComponentField::CharacterControllerStepOffset, offset);
    }

    /// Degrees.
    pub fn slope_limit(&self) -> f32 {
        self.binding.float(ComponentField::CharacterControllerSlopeLimit)
    }

    pub fn set_slope_limit(&self, degrees: f32) {
        self.binding
            .set(ComponentField::CharacterControllerSlopeLimit, degrees);
    }

    pub fn resize(&self, height: f32) {
        self.binding.command(ComponentCommand::Resize { height });
    }

    pub fn move_by(&self, displacement: Vec3) {
        self.binding.command(ComponentCommand::Move {
            displacement: displacement.into(),
        });
    }
}

//! Component verbs that are not plain field writes

use tessera_core::{AssetHandle, ComponentKind, ForceMode};

use crate::ffi::Vec3Record;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentCommand {
    Translate(Vec3Record),
    /// Euler radians added to the current rotation.
    Rotate(Vec3Record),
    /// Orbit `point` around `axis` by `angle` radians.
    RotateAround {
        point: Vec3Record,
        axis: Vec3Record,
        angle: f32,
    },
    LookAt {
        target: Vec3Record,
        up: Vec3Record,
    },

    AddForce {
        force: Vec3Record,
        mode: ForceMode,
    },
    AddForceAtPosition {
        force: Vec3Record,
        position: Vec3Record,
        mode: ForceMode,
    },
    AddTorque {
        torque: Vec3Record,
        mode: ForceMode,
    },
    Teleport {
        position: Vec3Record,
        rotation: Vec3Record,
    },

    Resize {
        height: f32,
    },
    Move {
        displacement: Vec3Record,
    },

    AddMaterial(AssetHandle),
    SetMaterial {
        index: u32,
        material: AssetHandle,
    },
}

impl ComponentCommand {
    /// Component kind the command applies to.
    #[must_use]
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::Translate(_) | Self::Rotate(_) | Self::RotateAround { .. } | Self::LookAt { .. } => {
                ComponentKind::Transform
            }
            Self::AddForce { .. }
            | Self::AddForceAtPosition { .. }
            | Self::AddTorque { .. }
            | Self::Teleport { .. } => ComponentKind::Rigidbody,
            Self::Resize { .. } | Self::Move { .. } => ComponentKind::CharacterController,
            Self::AddMaterial(_) | Self::SetMaterial { .. } => ComponentKind::MeshRenderer,
        }
    }

    /// Short verb name, used for logging and call accounting.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Translate(_) => "translate",
            Self::Rotate(_) => "rotate",
            Self::RotateAround { .. } => "rotate_around",
            Self::LookAt { .. } => "look_at",
            Self::AddForce { .. } => "add_force",
            Self::AddForceAtPosition { .. } => "add_force_at_position",
            Self::AddTorque { .. } => "add_torque",
            Self::Teleport { .. } => "teleport",
            Self::Resize { .. } => "resize",
            Self::Move { .. } => "move",
            Self::AddMaterial(_) => "add_material",
            Self::SetMaterial { .. } => "set_material",
        }
    }

    /// Whether the command applies a force or torque.
    #[must_use]
    pub const fn is_force(&self) -> bool {
        matches!(
            self,
            Self::AddForce { .. } | Self::AddForceAtPosition { .. } | Self::AddTorque { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_kinds() {
        let translate = ComponentCommand::Translate(Vec3Record::default());
        assert_eq!(translate.kind(), ComponentKind::Transform);
        assert_eq!(translate.verb(), "translate");

        let force = ComponentCommand::AddForce {
            force: Vec3Record::default(),
            mode: ForceMode::Impulse,
        };
        assert_eq!(force.kind(), ComponentKind::Rigidbody);
        assert!(force.is_force());

        let resize = ComponentCommand::Resize { height: 2.0 };
        assert_eq!(resize.kind(), ComponentKind::CharacterController);
        assert!(!resize.is_force());

        assert_eq!(
            ComponentCommand::AddMaterial(AssetHandle::INVALID).kind(),
            ComponentKind::MeshRenderer
        );
    }
}

//! The native call boundary
//!
//! Every call is a single atomic query or mutation. Entity-bearing calls take
//! the raw id and are no-ops (or report absence) for ids the engine does not
//! know. Field reads on an absent component are outside the contract; callers
//! check `has_component` first.

use tessera_core::{AssetHandle, ComponentKind, EntityId, LayerMask};
use tessera_services::{ButtonState, CursorMode, GamepadAxis, GamepadButton, KeyCode, MouseButton};

use crate::command::ComponentCommand;
use crate::ffi::{ColorRecord, HitInfoRecord, TransformRecord, Vec2Record, Vec3Record, VertexRecord};
use crate::field::{ComponentField, FieldValue};

/// Log severity, with the engine's numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 4,
    Error = 8,
}

/// A debug shape drawn for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoShape {
    WireSphere {
        center: Vec3Record,
        radius: f32,
    },
    WireCube {
        center: Vec3Record,
        rotation: Vec3Record,
        size: Vec3Record,
    },
    Line {
        from: Vec3Record,
        to: Vec3Record,
    },
}

/// Overrides applied to a prefab root when it is instantiated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrefabPlacement {
    pub translation: Option<Vec3Record>,
    pub rotation: Option<Vec3Record>,
    pub scale: Option<Vec3Record>,
}

impl PrefabPlacement {
    pub fn at(translation: impl Into<Vec3Record>) -> Self {
        Self {
            translation: Some(translation.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: impl Into<Vec3Record>) -> Self {
        self.rotation = Some(rotation.into());
        self
    }

    #[must_use]
    pub fn with_scale(mut self, scale: impl Into<Vec3Record>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    /// Apply the overrides on top of a prefab's stored root transform.
    pub fn apply(&self, base: TransformRecord) -> TransformRecord {
        TransformRecord {
            position: self.translation.unwrap_or(base.position),
            rotation: self.rotation.unwrap_or(base.rotation),
            scale: self.scale.unwrap_or(base.scale),
        }
    }
}

/// Flat engine interface, grouped by subsystem.
///
/// Methods take `&self`: the engine owns its state and implementations use
/// interior mutability.
pub trait NativeEngine {
    // Application
    fn quit(&self);
    fn vsync(&self) -> bool;
    fn set_vsync(&self, enabled: bool);
    fn window_size(&self) -> (u32, u32);

    // Noise
    fn noise_set_seed(&self, seed: i32);
    fn noise_simplex(&self, x: f32, y: f32) -> f32;
    fn noise_perlin(&self, x: f32, y: f32) -> f32;

    // Time
    fn delta_time(&self) -> f32;
    fn time_scale(&self) -> f32;
    fn set_time_scale(&self, scale: f32);

    // Assets
    fn asset_is_valid(&self, handle: AssetHandle) -> bool;
    /// `None` when the engine refuses the allocation.
    fn texture_create(&self, width: u32, height: u32) -> Option<AssetHandle>;
    fn texture_size(&self, texture: AssetHandle) -> Option<(u32, u32)>;
    fn texture_set_data(&self, texture: AssetHandle, data: &[ColorRecord]);
    fn mesh_create(&self, vertices: &[VertexRecord], indices: &[u32]) -> Option<AssetHandle>;
    fn material_set_albedo(&self, material: AssetHandle, texture: AssetHandle);

    // Scene manager
    fn load_scene(&self, scene: AssetHandle);
    fn current_scene_name(&self) -> String;

    // Scene
    fn is_entity_valid(&self, id: EntityId) -> bool;
    /// `EntityId::INVALID` when no entity has that name.
    fn entity_by_name(&self, name: &str) -> EntityId;
    fn create_entity(&self, name: &str) -> EntityId;
    /// Deferred; the entity stays valid until the end of the frame.
    fn destroy_entity(&self, id: EntityId);
    fn destroy_all_children(&self, id: EntityId);
    /// `parent` may be `EntityId::INVALID` for a root instance.
    fn instantiate_prefab(
        &self,
        prefab: AssetHandle,
        parent: EntityId,
        placement: &PrefabPlacement,
    ) -> EntityId;

    // Entity
    fn entity_is_active(&self, id: EntityId) -> bool;
    fn set_entity_active(&self, id: EntityId, active: bool);
    fn entity_parent(&self, id: EntityId) -> EntityId;
    fn set_entity_parent(&self, id: EntityId, parent: EntityId);
    fn entity_children(&self, id: EntityId) -> Vec<EntityId>;
    fn entity_child_by_name(&self, id: EntityId, name: &str) -> EntityId;

    // Components
    fn add_component(&self, id: EntityId, kind: ComponentKind);
    fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool;
    /// `false` when the component was not present.
    fn remove_component(&self, id: EntityId, kind: ComponentKind) -> bool;
    fn get_field(&self, id: EntityId, field: ComponentField) -> FieldValue;
    fn set_field(&self, id: EntityId, field: ComponentField, value: FieldValue);
    fn component_command(&self, id: EntityId, command: ComponentCommand);
    fn mesh_material(&self, id: EntityId, index: u32) -> Option<AssetHandle>;

    // Log
    fn log_message(&self, level: LogLevel, message: &str);

    // Gizmos
    fn draw_gizmo(&self, shape: GizmoShape, color: ColorRecord);

    // Input
    fn key_state(&self, key: KeyCode) -> ButtonState;
    fn mouse_button_state(&self, button: MouseButton) -> ButtonState;
    fn gamepad_button_state(&self, button: GamepadButton) -> ButtonState;
    fn mouse_position(&self) -> Vec2Record;
    fn mouse_delta(&self) -> Vec2Record;
    fn scroll_delta(&self) -> Vec2Record;
    fn cursor_mode(&self) -> CursorMode;
    fn set_cursor_mode(&self, mode: CursorMode);
    fn gamepad_axis(&self, axis: GamepadAxis) -> f32;

    // Physics
    fn raycast(
        &self,
        origin: Vec3Record,
        direction: Vec3Record,
        max_distance: f32,
        mask: Option<LayerMask>,
    ) -> Option<HitInfoRecord>;
    fn sphere_cast(
        &self,
        origin: Vec3Record,
        direction: Vec3Record,
        radius: f32,
        max_distance: f32,
    ) -> Option<HitInfoRecord>;
    fn overlap_sphere(&self, origin: Vec3Record, radius: f32) -> Vec<EntityId>;
    fn gravity(&self) -> Vec3Record;
    fn set_gravity(&self, gravity: Vec3Record);
    fn add_radial_impulse(&self, origin: Vec3Record, radius: f32, strength: f32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::glam::Vec3;
    use tessera_core::Transform;

    #[test]
    fn test_log_level_values() {
        assert_eq!(LogLevel::Debug as u8, 1);
        assert_eq!(LogLevel::Info as u8, 2);
        assert_eq!(LogLevel::Warn as u8, 4);
        assert_eq!(LogLevel::Error as u8, 8);
    }

    #[test]
    fn test_placement_overrides() {
        let base = TransformRecord::from(Transform::from_position(Vec3::new(1.0, 1.0, 1.0)));

        let unchanged = PrefabPlacement::default().apply(base);
        assert_eq!(unchanged, base);

        let moved = PrefabPlacement::at(Vec3::new(5.0, 0.0, 0.0))
            .with_scale(Vec3::splat(2.0))
            .apply(base);
        assert_eq!(Vec3::from(moved.position), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.rotation, base.rotation);
        assert_eq!(Vec3::from(moved.scale), Vec3::splat(2.0));
    }
}

//! Fixed-layout records exchanged across the native boundary
//!
//! Field order is part of the contract: colors are (r, g, b, a), vectors are
//! (x, y[, z]) and transforms are (position, rotation, scale).

use bytemuck::{Pod, Zeroable};
use tessera_core::glam::{Vec2, Vec3};
use tessera_core::{Color, EntityId, Transform};

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vec2Record {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ColorRecord {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Rotation is Euler radians.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TransformRecord {
    pub position: Vec3Record,
    pub rotation: Vec3Record,
    pub scale: Vec3Record,
}

/// Result of a ray or sphere cast.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct HitInfoRecord {
    pub entity_id: u64,
    pub point: Vec3Record,
    pub normal: Vec3Record,
    pub distance: f32,
    pub _padding: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct VertexRecord {
    pub position: Vec3Record,
    pub normal: Vec3Record,
    pub tangent: Vec3Record,
    pub uv: Vec2Record,
}

impl From<Vec2> for Vec2Record {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Vec2Record> for Vec2 {
    fn from(r: Vec2Record) -> Self {
        Vec2::new(r.x, r.y)
    }
}

impl From<Vec3> for Vec3Record {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3Record> for Vec3 {
    fn from(r: Vec3Record) -> Self {
        Vec3::new(r.x, r.y, r.z)
    }
}

impl From<Color> for ColorRecord {
    fn from(c: Color) -> Self {
        bytemuck::cast(c)
    }
}

impl From<ColorRecord> for Color {
    fn from(r: ColorRecord) -> Self {
        bytemuck::cast(r)
    }
}

impl From<Transform> for TransformRecord {
    fn from(t: Transform) -> Self {
        Self {
            position: t.position.into(),
            rotation: t.rotation.into(),
            scale: t.scale.into(),
        }
    }
}

impl From<TransformRecord> for Transform {
    fn from(r: TransformRecord) -> Self {
        Self {
            position: r.position.into(),
            rotation: r.rotation.into(),
            scale: r.scale.into(),
        }
    }
}

impl HitInfoRecord {
    #[must_use]
    pub fn new(entity: EntityId, point: Vec3, normal: Vec3, distance: f32) -> Self {
        Self {
            entity_id: entity.raw(),
            point: point.into(),
            normal: normal.into(),
            distance,
            _padding: 0,
        }
    }

    pub fn entity(&self) -> EntityId {
        EntityId::from_raw(self.entity_id)
    }
}

/// View a color buffer as boundary records without copying.
pub fn color_records(colors: &[Color]) -> &[ColorRecord] {
    bytemuck::cast_slice(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes() {
        assert_eq!(std::mem::size_of::<Vec2Record>(), 8);
        assert_eq!(std::mem::size_of::<Vec3Record>(), 12);
        assert_eq!(std::mem::size_of::<ColorRecord>(), 16);
        assert_eq!(std::mem::size_of::<TransformRecord>(), 36);
        assert_eq!(std::mem::size_of::<HitInfoRecord>(), 40);
        assert_eq!(std::mem::size_of::<VertexRecord>(), 44);
    }

    #[test]
    fn test_color_field_order() {
        let record = ColorRecord::from(Color::rgba(0.1, 0.2, 0.3, 0.4));
        assert_eq!(bytemuck::cast::<_, [f32; 4]>(record), [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_color_slice_is_not_copied() {
        let colors = [Color::RED, Color::GREEN];
        let records = color_records(&colors);
        assert_eq!(records.len(), 2);
        assert_eq!(records.as_ptr().cast::<u8>(), colors.as_ptr().cast::<u8>());
        assert_eq!(records[1], ColorRecord::from(Color::GREEN));
    }

    #[test]
    fn test_transform_record_layout() {
        let t = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::new(4.0, 5.0, 6.0),
            scale: Vec3::new(7.0, 8.0, 9.0),
        };
        let floats: [f32; 9] = bytemuck::cast(TransformRecord::from(t));
        assert_eq!(floats, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(Transform::from(TransformRecord::from(t)), t);
    }

    #[test]
    fn test_hit_info_entity() {
        let hit = HitInfoRecord::new(EntityId::from_raw(9), Vec3::ZERO, Vec3::Y, 2.5);
        assert_eq!(hit.entity(), EntityId::from_raw(9));
        assert_eq!(hit.distance, 2.5);
    }
}

//! Geometric queries over sphere colliders

use tessera_core::glam::Vec3;
use tessera_core::EntityId;

use crate::ffi::HitInfoRecord;

/// Every body is approximated by a sphere of this radius.
pub const COLLIDER_RADIUS: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct Collider {
    pub entity: EntityId,
    pub center: Vec3,
}

/// Entry distance of a ray into a sphere; zero when the origin is inside.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(0.0)
    } else {
        None
    }
}

/// Nearest sphere hit along a ray. Ties go to the lower id.
pub fn raycast(colliders: &[Collider], origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfoRecord> {
    sphere_cast(colliders, origin, direction, 0.0, max_distance)
}

/// Nearest hit of a swept sphere of `radius`.
pub fn sphere_cast(
    colliders: &[Collider],
    origin: Vec3,
    direction: Vec3,
    radius: f32,
    max_distance: f32,
) -> Option<HitInfoRecord> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO || max_distance < 0.0 {
        return None;
    }

    let mut best: Option<(f32, &Collider)> = None;
    for collider in colliders {
        let Some(distance) = ray_sphere(origin, direction, collider.center, COLLIDER_RADIUS + radius.max(0.0)) else {
            continue;
        };
        if distance > max_distance {
            continue;
        }
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, collider));
        }
    }

    best.map(|(distance, collider)| {
        let swept_center = origin + direction * distance;
        let mut normal = (swept_center - collider.center).normalize_or_zero();
        if normal == Vec3::ZERO {
            normal = -direction;
        }
        let point = collider.center + normal * COLLIDER_RADIUS;
        HitInfoRecord::new(collider.entity, point, normal, distance)
    })
}

/// Entities whose collider intersects the sphere, in the order given.
pub fn overlap_sphere(colliders: &[Collider], origin: Vec3, radius: f32) -> Vec<EntityId> {
    colliders
        .iter()
        .filter(|c| c.center.distance(origin) <= radius + COLLIDER_RADIUS)
        .map(|c| c.entity)
        .collect()
}

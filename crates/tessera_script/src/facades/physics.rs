use tessera_core::glam::Vec3;
use tessera_core::{EntityId, LayerMask};
use tessera_native::HitInfoRecord;

use crate::context::ScriptContext;
use crate::entity::Entity;

/// Result of a successful cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub entity_id: EntityId,
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

impl HitInfo {
    /// A fresh handle for the entity that was hit.
    pub fn entity(&self, ctx: &ScriptContext) -> Entity {
        ctx.entity(self.entity_id)
    }
}

impl From<HitInfoRecord> for HitInfo {
    fn from(record: HitInfoRecord) -> Self {
        Self {
            entity_id: record.entity(),
            point: record.point.into(),
            normal: record.normal.into(),
            distance: record.distance,
        }
    }
}

pub struct Physics<'a> {
    ctx: &'a ScriptContext,
}

impl<'a> Physics<'a> {
    pub(crate) fn new(ctx: &'a ScriptContext) -> Self {
        Self { ctx }
    }

    pub fn gravity(&self) -> Vec3 {
        self.ctx.engine().gravity().into()
    }

    pub fn set_gravity(&self, gravity: Vec3) {
        self.ctx.engine().set_gravity(gravity.into());
    }

    /// Whether anything lies within `max_distance` along the ray.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        self.cast_ray(origin, direction, max_distance, None).is_some()
    }

    pub fn raycast_hit(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfo> {
        self.cast_ray(origin, direction, max_distance, None)
    }

    /// Only colliders on a layer in `mask` are considered.
    pub fn raycast_filtered(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> bool {
        self.cast_ray(origin, direction, max_distance, Some(mask)).is_some()
    }

    pub fn raycast_hit_filtered(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<HitInfo> {
        self.cast_ray(origin, direction, max_distance, Some(mask))
    }

    pub fn sphere_cast(
        &self,
        origin: Vec3,
        direction: Vec3,
        radius: f32,
        max_distance: f32,
    ) -> Option<HitInfo> {
        self.ctx
            .engine()
            .sphere_cast(origin.into(), direction.into(), radius, max_distance)
            .map(HitInfo::from)
    }

    /// Every entity whose collider touches the sphere.
    pub fn overlap_sphere(&self, origin: Vec3, radius: f32) -> Vec<Entity> {
        self.ctx
            .engine()
            .overlap_sphere(origin.into(), radius)
            .into_iter()
            .map(|id| self.ctx.entity(id))
            .collect()
    }

    /// Impulse on every rigidbody within `radius`, falling off with distance.
    pub fn add_radial_impulse(&self, origin: Vec3, radius: f32, strength: f32) {
        self.ctx
            .engine()
            .add_radial_impulse(origin.into(), radius, strength);
    }

    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: Option<LayerMask>,
    ) -> Option<HitInfo> {
        self.ctx
            .engine()
            .raycast(origin.into(), direction.into(), max_distance, mask)
            .map(HitInfo::from)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use tessera_core::ComponentKind;
    use tessera_native::{HeadlessEngine, NativeEngine};

    use super::*;
    use crate::components::{RigidbodyComponent, TransformComponent};

    fn setup() -> (Rc<HeadlessEngine>, ScriptContext) {
        let headless = Rc::new(HeadlessEngine::new());
        let ctx = ScriptContext::with_seed(headless.clone(), 0);
        (headless, ctx)
    }

    fn body_at(ctx: &ScriptContext, name: &str, position: Vec3) -> Entity {
        let entity = ctx.scene().create_entity(name);
        entity.add_component::<RigidbodyComponent>().unwrap();
        entity
            .get_component::<TransformComponent>()
            .unwrap()
            .set_position(position);
        entity
    }

    #[test]
    fn test_raycast_hits_nearest() {
        let (_headless, ctx) = setup();
        let near = body_at(&ctx, "Near", Vec3::new(0.0, 0.0, 5.0));
        body_at(&ctx, "Far", Vec3::new(0.0, 0.0, 9.0));

        let physics = ctx.physics();
        let hit = physics.raycast_hit(Vec3::ZERO, Vec3::Z, 100.0).unwrap();
        assert_eq!(hit.entity(&ctx), near);
        assert!((hit.distance - 4.5).abs() < 1e-4);
        assert!(physics.raycast(Vec3::ZERO, Vec3::Z, 100.0));
        assert!(!physics.raycast(Vec3::ZERO, Vec3::Z, 2.0));
        assert!(!physics.raycast(Vec3::ZERO, Vec3::X, 100.0));
    }

    #[test]
    fn test_layer_filter() {
        let (_headless, ctx) = setup();
        body_at(&ctx, "Target", Vec3::new(0.0, 0.0, 3.0));

        let physics = ctx.physics();
        assert!(physics.raycast_filtered(Vec3::ZERO, Vec3::Z, 10.0, LayerMask::ALL));
        assert!(physics
            .raycast_hit_filtered(Vec3::ZERO, Vec3::Z, 10.0, LayerMask(0b10))
            .is_none());
    }

    #[test]
    fn test_overlap_sphere() {
        let (_headless, ctx) = setup();
        let inside = body_at(&ctx, "Inside", Vec3::new(1.0, 0.0, 0.0));
        body_at(&ctx, "Outside", Vec3::new(10.0, 0.0, 0.0));

        let hits = ctx.physics().overlap_sphere(Vec3::ZERO, 1.0);
        assert_eq!(hits, vec![inside]);
    }

    #[test]
    fn test_gravity_round_trip() {
        let (headless, ctx) = setup();
        ctx.physics().set_gravity(Vec3::new(0.0, -1.62, 0.0));
        assert_eq!(ctx.physics().gravity(), Vec3::new(0.0, -1.62, 0.0));
        assert_eq!(headless.calls("set_gravity"), 1);
    }

    #[test]
    fn test_radial_impulse_reaches_bodies() {
        let (headless, ctx) = setup();
        let body = body_at(&ctx, "Body", Vec3::new(1.0, 0.0, 0.0));
        let bystander = ctx.scene().create_entity("Bystander");
        assert!(!headless.has_component(bystander.id(), ComponentKind::Rigidbody));

        ctx.physics().add_radial_impulse(Vec3::ZERO, 5.0, 10.0);
        let journal = headless.force_journal();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].0, body.id());
    }
}

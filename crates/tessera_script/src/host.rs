//! Script instances and engine-to-script callbacks
//!
//! The engine reports lifecycle points as `ScriptEvent`s; the host looks up
//! the instance attached to the entity and calls the matching method
//! synchronously.

use std::any::Any;
use std::collections::BTreeMap;

use tessera_core::EntityId;
use tracing::{debug, warn};

use crate::components::ScriptComponent;
use crate::context::ScriptContext;
use crate::entity::Entity;
use crate::error::ScriptError;

/// Upcast to `Any` for typed downcasts of boxed scripts.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Gameplay behaviour attached to one entity. Every callback defaults to
/// doing nothing.
#[allow(unused_variables)]
pub trait EntityScript: AsAny {
    /// Called once from `ScriptHost::attach`.
    fn on_create(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    fn on_start(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    fn on_update(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    fn on_late_update(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    fn on_fixed_update(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    fn on_end(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    /// Called once, just before the entity leaves the scene. Its components
    /// are still readable.
    fn on_destroy(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    fn on_debug(&mut self, ctx: &ScriptContext, entity: &Entity) {}

    fn on_collision_enter(&mut self, ctx: &ScriptContext, entity: &Entity, other: &Entity) {}
    fn on_collision_exit(&mut self, ctx: &ScriptContext, entity: &Entity, other: &Entity) {}
    fn on_trigger_enter(&mut self, ctx: &ScriptContext, entity: &Entity, other: &Entity) {}
    fn on_trigger_exit(&mut self, ctx: &ScriptContext, entity: &Entity, other: &Entity) {}

    fn on_frustum_enter(&mut self, ctx: &ScriptContext, entity: &Entity) {}
    fn on_frustum_exit(&mut self, ctx: &ScriptContext, entity: &Entity) {}
}

/// A notification from the engine to one script instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEvent {
    Start,
    Update,
    LateUpdate,
    FixedUpdate,
    End,
    Debug,
    CollisionEnter(EntityId),
    CollisionExit(EntityId),
    TriggerEnter(EntityId),
    TriggerExit(EntityId),
    FrustumEnter,
    FrustumExit,
}

struct ScriptInstance {
    entity: Entity,
    script: Box<dyn EntityScript>,
    destroy_notified: bool,
}

/// Dispatch table from entity id to its script instance.
pub struct ScriptHost {
    ctx: ScriptContext,
    instances: BTreeMap<EntityId, ScriptInstance>,
}

impl ScriptHost {
    pub fn new(ctx: ScriptContext) -> Self {
        Self {
            ctx,
            instances: BTreeMap::new(),
        }
    }

    pub fn context(&self) -> &ScriptContext {
        &self.ctx
    }

    /// Bind `script` to `id`, add its `Script` component and run `on_create`.
    pub fn attach(&mut self, id: EntityId, mut script: Box<dyn EntityScript>) -> Result<(), ScriptError> {
        let entity = self.ctx.entity(id);
        if !entity.is_valid() {
            return Err(ScriptError::InvalidEntity(id));
        }
        if self.instances.contains_key(&id) {
            return Err(ScriptError::ScriptAlreadyAttached(id));
        }
        if entity.add_component::<ScriptComponent>().is_none() {
            return Err(ScriptError::InvalidEntity(id));
        }

        script.on_create(&self.ctx, &entity);
        debug!(entity = %id, "script attached");
        self.instances.insert(
            id,
            ScriptInstance {
                entity,
                script,
                destroy_notified: false,
            },
        );
        Ok(())
    }

    /// Deliver `event` to the script on `id`. Returns whether one received it.
    pub fn dispatch(&mut self, id: EntityId, event: &ScriptEvent) -> bool {
        let Some(instance) = self.instances.get_mut(&id) else {
            return false;
        };
        deliver(&self.ctx, instance, event);
        true
    }

    /// Deliver `event` to every instance in ascending id order.
    pub fn broadcast(&mut self, event: &ScriptEvent) -> usize {
        for instance in self.instances.values_mut() {
            deliver(&self.ctx, instance, event);
        }
        self.instances.len()
    }

    /// Run `on_destroy` for entities queued for destruction that are still
    /// live. Returns how many scripts were notified.
    ///
    /// Instances already notified are skipped, so calling this again after a
    /// script queued more destroys only reaches the new ones.
    pub fn entities_destroying(&mut self, ids: &[EntityId]) -> usize {
        let mut notified = 0;
        for id in ids {
            let Some(instance) = self.instances.get_mut(id) else {
                continue;
            };
            if instance.destroy_notified {
                continue;
            }
            instance.destroy_notified = true;
            instance.script.on_destroy(&self.ctx, &instance.entity);
            notified += 1;
        }
        notified
    }

    /// Drop the instances of entities the engine removed and clear their
    /// caches.
    ///
    /// A script that missed `entities_destroying` still gets `on_destroy`
    /// here, against an entity that is already gone. Ids without a script are
    /// ignored.
    pub fn entities_destroyed(&mut self, ids: &[EntityId]) {
        for id in ids {
            let Some(mut instance) = self.instances.remove(id) else {
                continue;
            };
            if !instance.destroy_notified {
                warn!(entity = %id, "on_destroy delivered after removal");
                instance.script.on_destroy(&self.ctx, &instance.entity);
            }
            instance.entity.on_entity_destroyed();
            debug!(entity = %id, "script destroyed");
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.instances.contains_key(&id)
    }

    /// The host's own handle for a scripted entity.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.instances.get(&id).map(|instance| &instance.entity)
    }

    pub fn script<T: EntityScript>(&self, id: EntityId) -> Option<&T> {
        let instance = self.instances.get(&id)?;
        <dyn EntityScript as AsAny>::as_any(&*instance.script).downcast_ref::<T>()
    }

    pub fn script_mut<T: EntityScript>(&mut self, id: EntityId) -> Option<&mut T> {
        let instance = self.instances.get_mut(&id)?;
        <dyn EntityScript as AsAny>::as_any_mut(&mut *instance.script).downcast_mut::<T>()
    }

    /// Whether `entity` has a `Script` component whose instance is a `T`.
    pub fn is<T: EntityScript>(&self, entity: &Entity) -> bool {
        self.as_script::<T>(entity).is_some()
    }

    /// The `T` instance on `entity`, if its `Script` component holds one.
    pub fn as_script<T: EntityScript>(&self, entity: &Entity) -> Option<&T> {
        if !entity.has_component::<ScriptComponent>() {
            if self.instances.contains_key(&entity.id()) {
                warn!(entity = %entity.id(), "script instance without Script component");
            }
            return None;
        }
        self.script::<T>(entity.id())
    }
}

fn deliver(ctx: &ScriptContext, instance: &mut ScriptInstance, event: &ScriptEvent) {
    let ScriptInstance { entity, script, .. } = instance;
    match *event {
        ScriptEvent::Start => script.on_start(ctx, entity),
        ScriptEvent::Update => script.on_update(ctx, entity),
        ScriptEvent::LateUpdate => script.on_late_update(ctx, entity),
        ScriptEvent::FixedUpdate => script.on_fixed_update(ctx, entity),
        ScriptEvent::End => script.on_end(ctx, entity),
        ScriptEvent::Debug => script.on_debug(ctx, entity),
        ScriptEvent::CollisionEnter(other) => script.on_collision_enter(ctx, entity, &ctx.entity(other)),
        ScriptEvent::CollisionExit(other) => script.on_collision_exit(ctx, entity, &ctx.entity(other)),
        ScriptEvent::TriggerEnter(other) => script.on_trigger_enter(ctx, entity, &ctx.entity(other)),
        ScriptEvent::TriggerExit(other) => script.on_trigger_exit(ctx, entity, &ctx.entity(other)),
        ScriptEvent::FrustumEnter => script.on_frustum_enter(ctx, entity),
        ScriptEvent::FrustumExit => script.on_frustum_exit(ctx, entity),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tessera_core::glam::Vec3;
    use tessera_native::{HeadlessEngine, NativeEngine};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Recorder {
        fn push(&self, entity: &Entity, what: &str) {
            self.seen.borrow_mut().push(format!("{}:{what}", entity.id().raw()));
        }
    }

    impl EntityScript for Recorder {
        fn on_create(&mut self, _ctx: &ScriptContext, entity: &Entity) {
            self.push(entity, "create");
        }

        fn on_update(&mut self, _ctx: &ScriptContext, entity: &Entity) {
            self.push(entity, "update");
        }

        fn on_destroy(&mut self, _ctx: &ScriptContext, entity: &Entity) {
            self.push(entity, "destroy");
        }

        fn on_trigger_enter(&mut self, _ctx: &ScriptContext, entity: &Entity, other: &Entity) {
            self.push(entity, &format!("trigger {}", other.name()));
        }
    }

    struct Idle;

    impl EntityScript for Idle {}

    fn setup() -> (Rc<HeadlessEngine>, ScriptHost) {
        let headless = Rc::new(HeadlessEngine::new());
        let host = ScriptHost::new(ScriptContext::with_seed(headless.clone(), 0));
        (headless, host)
    }

    #[test]
    fn test_attach_validates() {
        let (headless, mut host) = setup();
        assert_eq!(
            host.attach(EntityId::from_raw(5), Box::new(Idle)),
            Err(ScriptError::InvalidEntity(EntityId::from_raw(5)))
        );

        let id = headless.create_entity("A");
        host.attach(id, Box::new(Idle)).unwrap();
        assert!(headless.has_component(id, tessera_core::ComponentKind::Script));
        assert_eq!(
            host.attach(id, Box::new(Idle)),
            Err(ScriptError::ScriptAlreadyAttached(id))
        );
        assert_eq!(host.len(), 1);
    }

    #[test]
    fn test_lifecycle_order() {
        let (headless, mut host) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let a = headless.create_entity("A");
        let b = headless.create_entity("B");

        host.attach(b, Box::new(Recorder { seen: seen.clone() })).unwrap();
        host.attach(a, Box::new(Recorder { seen: seen.clone() })).unwrap();
        assert_eq!(host.broadcast(&ScriptEvent::Update), 2);
        assert!(host.dispatch(a, &ScriptEvent::TriggerEnter(b)));
        assert!(!host.dispatch(EntityId::from_raw(99), &ScriptEvent::Update));

        headless.destroy_entity(a);
        let pending = headless.pending_destroy();
        assert_eq!(host.entities_destroying(&pending), 1);
        assert_eq!(host.entities_destroying(&pending), 0);
        let destroyed = headless.end_frame();
        host.entities_destroyed(&destroyed);
        host.entities_destroyed(&destroyed);

        assert_eq!(
            *seen.borrow(),
            vec![
                "2:create",
                "1:create",
                "1:update",
                "2:update",
                "1:trigger B",
                "1:destroy",
            ]
        );
        assert!(!host.contains(a));
        assert!(host.contains(b));
    }

    #[test]
    fn test_destroy_clears_host_cache() {
        let (headless, mut host) = setup();
        let id = headless.create_entity("A");
        host.attach(id, Box::new(Idle)).unwrap();
        assert!(!host.entity(id).unwrap().cache().is_empty());

        headless.destroy_entity(id);
        let destroyed = headless.end_frame();
        host.entities_destroyed(&destroyed);
        assert!(host.entity(id).is_none());
        assert!(host.is_empty());
    }

    #[derive(Default)]
    struct LastLook {
        seen: Rc<RefCell<Option<(bool, Option<Vec3>)>>>,
    }

    impl EntityScript for LastLook {
        fn on_destroy(&mut self, _ctx: &ScriptContext, entity: &Entity) {
            let position = entity.transform().map(|transform| transform.position());
            *self.seen.borrow_mut() = Some((entity.is_valid(), position));
        }
    }

    #[test]
    fn test_on_destroy_sees_live_entity() {
        let (headless, mut host) = setup();
        let seen = Rc::new(RefCell::new(None));
        let id = headless.create_entity("A");
        host.attach(id, Box::new(LastLook { seen: seen.clone() })).unwrap();
        host.entity(id).unwrap().transform().unwrap().set_position(Vec3::new(1.0, 2.0, 3.0));

        host.context().entity(id).destroy();
        host.entities_destroying(&headless.pending_destroy());
        assert_eq!(*seen.borrow(), Some((true, Some(Vec3::new(1.0, 2.0, 3.0)))));
        assert!(host.contains(id));

        host.entities_destroyed(&headless.end_frame());
        assert!(!host.contains(id));
    }

    #[test]
    fn test_late_destroy_still_notifies_once() {
        let (headless, mut host) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = headless.create_entity("A");
        host.attach(id, Box::new(Recorder { seen: seen.clone() })).unwrap();

        headless.destroy_entity(id);
        let destroyed = headless.end_frame();
        host.entities_destroyed(&destroyed);
        host.entities_destroyed(&destroyed);
        assert_eq!(*seen.borrow(), vec!["1:create", "1:destroy"]);
    }

    #[test]
    fn test_typed_downcasts() {
        let (headless, mut host) = setup();
        let id = headless.create_entity("A");
        host.attach(id, Box::new(Recorder::default())).unwrap();
        let entity = host.context().entity(id);

        assert!(host.is::<Recorder>(&entity));
        assert!(!host.is::<Idle>(&entity));
        assert!(host.as_script::<Recorder>(&entity).is_some());
        assert!(host.script_mut::<Recorder>(id).is_some());

        headless.remove_component(id, tessera_core::ComponentKind::Script);
        assert!(!host.is::<Recorder>(&entity));
        assert!(host.script::<Recorder>(id).is_some());
    }
}

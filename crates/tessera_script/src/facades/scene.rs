use tessera_core::EntityId;
use tessera_native::{NativeEngine, PrefabPlacement};
use tracing::warn;

use crate::assets::{Prefab, SceneAsset};
use crate::context::ScriptContext;
use crate::entity::Entity;

/// Entity lookup, creation and destruction in the active scene.
pub struct Scene<'a> {
    ctx: &'a ScriptContext,
}

impl<'a> Scene<'a> {
    pub(crate) fn new(ctx: &'a ScriptContext) -> Self {
        Self { ctx }
    }

    /// First entity with this name, if any.
    pub fn entity_by_name(&self, name: &str) -> Option<Entity> {
        let id = self.ctx.engine().entity_by_name(name);
        (!id.is_null()).then(|| self.ctx.entity(id))
    }

    /// `None` unless `id` names a live entity.
    pub fn entity_by_id(&self, id: EntityId) -> Option<Entity> {
        let entity = self.ctx.entity(id);
        entity.is_valid().then_some(entity)
    }

    /// A new root entity with `Name` and `Transform` components.
    pub fn create_entity(&self, name: &str) -> Entity {
        self.ctx.entity(self.ctx.engine().create_entity(name))
    }

    /// Deferred until the end of the frame.
    pub fn destroy_entity(&self, entity: &Entity) {
        self.ctx.engine().destroy_entity(entity.id());
    }

    pub fn destroy_all_children(&self, entity: &Entity) {
        self.ctx.engine().destroy_all_children(entity.id());
    }

    /// Instantiate `prefab` at the scene root.
    pub fn instantiate(&self, prefab: &Prefab, placement: PrefabPlacement) -> Option<Entity> {
        self.spawn(prefab, EntityId::INVALID, placement)
    }

    pub fn instantiate_with_parent(
        &self,
        prefab: &Prefab,
        parent: &Entity,
        placement: PrefabPlacement,
    ) -> Option<Entity> {
        self.spawn(prefab, parent.id(), placement)
    }

    fn spawn(&self, prefab: &Prefab, parent: EntityId, placement: PrefabPlacement) -> Option<Entity> {
        if !prefab.is_set() {
            warn!("instantiate with an unset prefab");
            return None;
        }
        let id = self
            .ctx
            .engine()
            .instantiate_prefab(prefab.handle(), parent, &placement);
        (!id.is_null()).then(|| self.ctx.entity(id))
    }
}

pub struct SceneManager<'a> {
    engine: &'a dyn NativeEngine,
}

impl<'a> SceneManager<'a> {
    pub(crate) fn new(engine: &'a dyn NativeEngine) -> Self {
        Self { engine }
    }

    /// Replace the active scene. Entities of the old scene are destroyed at
    /// the end of the frame.
    pub fn load_scene(&self, scene: &SceneAsset) {
        if !scene.is_set() {
            warn!("load_scene with an unset scene");
            return;
        }
        self.engine.load_scene(scene.handle());
    }

    pub fn current_scene_name(&self) -> String {
        self.engine.current_scene_name()
    }
}

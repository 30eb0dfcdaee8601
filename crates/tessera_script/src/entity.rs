//! Script-side entity handle
//!
//! An `Entity` is a view of one native entity: the id, the engine, and a
//! private component cache. Several `Entity` values may name the same id;
//! each keeps its own cache and they compare equal.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use tessera_core::{ComponentKind, EntityId};
use tessera_native::{ComponentField, NativeEngine, PrefabPlacement};
use tracing::{debug, trace, warn};

use crate::assets::Prefab;
use crate::cache::{ComponentCache, ComponentSlot};
use crate::components::{
    CharacterControllerComponent, Component, MeshRendererComponent, NameComponent,
    PointLightComponent, RigidbodyComponent, ScriptComponent, SpotlightComponent,
    SpriteRendererComponent, TextRendererComponent, TransformComponent,
};
use crate::error::ScriptError;

pub struct Entity {
    id: EntityId,
    engine: Rc<dyn NativeEngine>,
    cache: RefCell<ComponentCache>,
}

impl Entity {
    /// A fresh view of `id` with an empty cache.
    pub fn new(id: EntityId, engine: Rc<dyn NativeEngine>) -> Self {
        Self {
            id,
            engine,
            cache: RefCell::new(ComponentCache::new()),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn engine(&self) -> &Rc<dyn NativeEngine> {
        &self.engine
    }

    /// Whether the entity still exists in the active scene.
    ///
    /// Asked fresh on every call; the null id short-circuits without a
    /// boundary call.
    pub fn is_valid(&self) -> bool {
        !self.id.is_null() && self.engine.is_entity_valid(self.id)
    }

    /// Read-only view of this handle's cache.
    pub fn cache(&self) -> Ref<'_, ComponentCache> {
        self.cache.borrow()
    }

    /// Existing component if present, otherwise a newly created one.
    ///
    /// `None` when the handle is invalid or the engine did not create it.
    pub fn add_component<T: Component>(&self) -> Option<Rc<T>> {
        if !self.is_valid() {
            warn!(entity = %self.id, kind = %T::KIND, "add_component on invalid entity");
            return None;
        }
        if self.has_component::<T>() {
            return self.get_component::<T>();
        }

        self.engine.add_component(self.id, T::KIND);
        if !self.has_component::<T>() {
            warn!(entity = %self.id, kind = %T::KIND, "engine did not add component");
            return None;
        }

        let component = Rc::new(T::bind(self.id, Rc::clone(&self.engine)));
        self.cache.borrow_mut().insert(Rc::clone(&component));
        debug!(entity = %self.id, kind = %T::KIND, "component added and cached");
        Some(component)
    }

    /// Authoritative presence check. Never consults the cache.
    pub fn has_component<T: Component>(&self) -> bool {
        self.has_kind(T::KIND)
    }

    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        self.engine.has_component(self.id, kind)
    }

    /// Returns whether the engine removed the component.
    pub fn remove_component<T: Component>(&self) -> bool {
        let removed = self.engine.remove_component(self.id, T::KIND);
        if removed && self.cache.borrow_mut().evict(T::KIND) {
            debug!(entity = %self.id, kind = %T::KIND, "evicted removed component");
        }
        removed
    }

    /// The cached wrapper for `T`, or a new one, if the engine has the component.
    pub fn get_component<T: Component>(&self) -> Option<Rc<T>> {
        if !self.has_component::<T>() {
            if self.cache.borrow_mut().evict(T::KIND) {
                debug!(entity = %self.id, kind = %T::KIND, "evicted stale component");
            }
            return None;
        }

        let cached = self.cache.borrow().get::<T>();
        if let Some(component) = cached {
            trace!(entity = %self.id, kind = %T::KIND, "component cache hit");
            return Some(component);
        }

        trace!(entity = %self.id, kind = %T::KIND, "component cache miss");
        let component = Rc::new(T::bind(self.id, Rc::clone(&self.engine)));
        self.cache.borrow_mut().insert(Rc::clone(&component));
        Some(component)
    }

    /// `get_component` with an error naming the missing kind.
    pub fn try_get_component<T: Component>(&self) -> Result<Rc<T>, ScriptError> {
        self.get_component::<T>()
            .ok_or(ScriptError::MissingComponent {
                entity: self.id,
                kind: T::KIND,
            })
    }

    /// Untyped `get_component`, dispatched over the closed set of kinds.
    pub fn get_kind(&self, kind: ComponentKind) -> Option<ComponentSlot> {
        match kind {
            ComponentKind::Name => self.get_component::<NameComponent>().map(ComponentSlot::Name),
            ComponentKind::Transform => self
                .get_component::<TransformComponent>()
                .map(ComponentSlot::Transform),
            ComponentKind::MeshRenderer => self
                .get_component::<MeshRendererComponent>()
                .map(ComponentSlot::MeshRenderer),
            ComponentKind::SpriteRenderer => self
                .get_component::<SpriteRendererComponent>()
                .map(ComponentSlot::SpriteRenderer),
            ComponentKind::TextRenderer => self
                .get_component::<TextRendererComponent>()
                .map(ComponentSlot::TextRenderer),
            ComponentKind::PointLight => self
                .get_component::<PointLightComponent>()
                .map(ComponentSlot::PointLight),
            ComponentKind::Spotlight => self
                .get_component::<SpotlightComponent>()
                .map(ComponentSlot::Spotlight),
            ComponentKind::Script => self
                .get_component::<ScriptComponent>()
                .map(ComponentSlot::Script),
            ComponentKind::Rigidbody => self
                .get_component::<RigidbodyComponent>()
                .map(ComponentSlot::Rigidbody),
            ComponentKind::CharacterController => self
                .get_component::<CharacterControllerComponent>()
                .map(ComponentSlot::CharacterController),
        }
    }

    /// Untyped `add_component`, dispatched over the closed set of kinds.
    pub fn add_kind(&self, kind: ComponentKind) -> Option<ComponentSlot> {
        match kind {
            ComponentKind::Name => self.add_component::<NameComponent>().map(ComponentSlot::Name),
            ComponentKind::Transform => self
                .add_component::<TransformComponent>()
                .map(ComponentSlot::Transform),
            ComponentKind::MeshRenderer => self
                .add_component::<MeshRendererComponent>()
                .map(ComponentSlot::MeshRenderer),
            ComponentKind::SpriteRenderer => self
                .add_component::<SpriteRendererComponent>()
                .map(ComponentSlot::SpriteRenderer),
            ComponentKind::TextRenderer => self
                .add_component::<TextRendererComponent>()
                .map(ComponentSlot::TextRenderer),
            ComponentKind::PointLight => self
                .add_component::<PointLightComponent>()
                .map(ComponentSlot::PointLight),
            ComponentKind::Spotlight => self
                .add_component::<SpotlightComponent>()
                .map(ComponentSlot::Spotlight),
            ComponentKind::Script => self
                .add_component::<ScriptComponent>()
                .map(ComponentSlot::Script),
            ComponentKind::Rigidbody => self
                .add_component::<RigidbodyComponent>()
                .map(ComponentSlot::Rigidbody),
            ComponentKind::CharacterController => self
                .add_component::<CharacterControllerComponent>()
                .map(ComponentSlot::CharacterController),
        }
    }

    /// End-of-life notification from the engine. Empties the cache.
    pub fn on_entity_destroyed(&self) {
        let mut cache = self.cache.borrow_mut();
        debug!(entity = %self.id, cached = cache.len(), "clearing component cache");
        cache.clear();
    }

    pub fn name(&self) -> String {
        self.engine
            .get_field(self.id, ComponentField::NameTag)
            .into_text()
            .unwrap_or_default()
    }

    pub fn transform(&self) -> Option<Rc<TransformComponent>> {
        self.get_component::<TransformComponent>()
    }

    pub fn is_active(&self) -> bool {
        self.engine.entity_is_active(self.id)
    }

    pub fn set_active(&self, active: bool) {
        self.engine.set_entity_active(self.id, active);
    }

    pub fn parent(&self) -> Option<Entity> {
        self.wrap(self.engine.entity_parent(self.id))
    }

    /// `None` detaches the entity to the scene root.
    pub fn set_parent(&self, parent: Option<&Entity>) {
        let parent = parent.map_or(EntityId::INVALID, Entity::id);
        self.engine.set_entity_parent(self.id, parent);
    }

    pub fn children(&self) -> Vec<Entity> {
        self.engine
            .entity_children(self.id)
            .into_iter()
            .map(|id| Entity::new(id, Rc::clone(&self.engine)))
            .collect()
    }

    pub fn child_by_name(&self, name: &str) -> Option<Entity> {
        self.wrap(self.engine.entity_child_by_name(self.id, name))
    }

    /// Queue this entity for destruction at the end of the frame.
    pub fn destroy(&self) {
        self.engine.destroy_entity(self.id);
    }

    pub fn destroy_all_children(&self) {
        self.engine.destroy_all_children(self.id);
    }

    /// Instantiate `prefab` as a child of this entity.
    pub fn instantiate_child(&self, prefab: &Prefab, placement: PrefabPlacement) -> Option<Entity> {
        if !prefab.is_set() {
            return None;
        }
        self.wrap(self.engine.instantiate_prefab(prefab.handle(), self.id, &placement))
    }

    fn wrap(&self, id: EntityId) -> Option<Entity> {
        (!id.is_null()).then(|| Entity::new(id, Rc::clone(&self.engine)))
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("cached", &self.cache.borrow().kinds())
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_native::HeadlessEngine;

    fn setup() -> (Rc<HeadlessEngine>, Rc<dyn NativeEngine>) {
        let headless = Rc::new(HeadlessEngine::new());
        let engine: Rc<dyn NativeEngine> = headless.clone();
        (headless, engine)
    }

    #[test]
    fn test_null_handle_skips_boundary() {
        let (headless, engine) = setup();
        let entity = Entity::new(EntityId::INVALID, engine);
        assert!(!entity.is_valid());
        assert_eq!(headless.calls("is_entity_valid"), 0);
    }

    #[test]
    fn test_add_component_on_invalid_entity() {
        let (headless, engine) = setup();
        let entity = Entity::new(EntityId::from_raw(42), engine);
        assert!(entity.add_component::<RigidbodyComponent>().is_none());
        assert_eq!(headless.calls("add_component"), 0);
        assert!(entity.cache().is_empty());
    }

    #[test]
    fn test_add_existing_returns_cached_wrapper() {
        let (headless, engine) = setup();
        let entity = Entity::new(headless.create_entity("Box"), engine);

        let first = entity.add_component::<MeshRendererComponent>().unwrap();
        let second = entity.add_component::<MeshRendererComponent>().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(headless.calls("add_component"), 1);
    }

    #[test]
    fn test_has_component_never_touches_cache() {
        let (headless, engine) = setup();
        let entity = Entity::new(headless.create_entity("Box"), engine);
        assert!(entity.has_component::<TransformComponent>());
        assert!(entity.cache().is_empty());
    }

    #[test]
    fn test_try_get_component() {
        let (headless, engine) = setup();
        let id = headless.create_entity("Box");
        let entity = Entity::new(id, engine);

        assert!(entity.try_get_component::<NameComponent>().is_ok());
        assert_eq!(
            entity.try_get_component::<PointLightComponent>().unwrap_err(),
            ScriptError::MissingComponent {
                entity: id,
                kind: ComponentKind::PointLight
            }
        );
    }

    #[test]
    fn test_kind_dispatch() {
        let (headless, engine) = setup();
        let entity = Entity::new(headless.create_entity("Box"), engine);

        let added = entity.add_kind(ComponentKind::Spotlight).unwrap();
        assert_eq!(added.kind(), ComponentKind::Spotlight);
        let fetched = entity.get_kind(ComponentKind::Spotlight).unwrap();
        assert!(added.ptr_eq(&fetched));
        assert!(entity.get_kind(ComponentKind::Rigidbody).is_none());
    }

    #[test]
    fn test_hierarchy() {
        let (headless, engine) = setup();
        let parent = Entity::new(headless.create_entity("Parent"), Rc::clone(&engine));
        let child = Entity::new(headless.create_entity("Child"), engine);

        assert!(child.parent().is_none());
        child.set_parent(Some(&parent));
        assert_eq!(child.parent(), Some(Entity::new(parent.id(), Rc::clone(parent.engine()))));
        assert_eq!(parent.children(), vec![Entity::new(child.id(), Rc::clone(child.engine()))]);
        assert_eq!(parent.child_by_name("Child").map(|e| e.id()), Some(child.id()));
        assert!(parent.child_by_name("Nobody").is_none());

        child.set_parent(None);
        assert!(parent.children().is_empty());
    }

    #[test]
    fn test_name_and_active() {
        let (headless, engine) = setup();
        let entity = Entity::new(headless.create_entity("Player"), engine);
        assert_eq!(entity.name(), "Player");
        assert_eq!(entity.to_string(), "Entity(1)");

        assert!(entity.is_active());
        entity.set_active(false);
        assert!(!entity.is_active());
    }
}

//! Per-entity component cache
//!
//! A fixed table with one slot per `ComponentKind`. The cache only remembers
//! which wrapper was handed out for a kind so repeated lookups return the same
//! `Rc`. It is never consulted for presence; `Entity` asks the engine first and
//! evicts a slot as soon as the engine reports the kind absent.

use std::fmt;
use std::rc::Rc;

use tessera_core::ComponentKind;

use crate::components::{
    CharacterControllerComponent, Component, MeshRendererComponent, NameComponent,
    PointLightComponent, RigidbodyComponent, ScriptComponent, SpotlightComponent,
    SpriteRendererComponent, TextRendererComponent, TransformComponent,
};

/// A cached wrapper of any kind.
#[derive(Debug, Clone)]
pub enum ComponentSlot {
    Name(Rc<NameComponent>),
    Transform(Rc<TransformComponent>),
    MeshRenderer(Rc<MeshRendererComponent>),
    SpriteRenderer(Rc<SpriteRendererComponent>),
    TextRenderer(Rc<TextRendererComponent>),
    PointLight(Rc<PointLightComponent>),
    Spotlight(Rc<SpotlightComponent>),
    Script(Rc<ScriptComponent>),
    Rigidbody(Rc<RigidbodyComponent>),
    CharacterController(Rc<CharacterControllerComponent>),
}

impl ComponentSlot {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Name(_) => ComponentKind::Name,
            Self::Transform(_) => ComponentKind::Transform,
            Self::MeshRenderer(_) => ComponentKind::MeshRenderer,
            Self::SpriteRenderer(_) => ComponentKind::SpriteRenderer,
            Self::TextRenderer(_) => ComponentKind::TextRenderer,
            Self::PointLight(_) => ComponentKind::PointLight,
            Self::Spotlight(_) => ComponentKind::Spotlight,
            Self::Script(_) => ComponentKind::Script,
            Self::Rigidbody(_) => ComponentKind::Rigidbody,
            Self::CharacterController(_) => ComponentKind::CharacterController,
        }
    }

    /// Wrapper identity: both slots hold the same allocation.
    pub fn ptr_eq(&self, other: &ComponentSlot) -> bool {
        match (self, other) {
            (Self::Name(a), Self::Name(b)) => Rc::ptr_eq(a, b),
            (Self::Transform(a), Self::Transform(b)) => Rc::ptr_eq(a, b),
            (Self::MeshRenderer(a), Self::MeshRenderer(b)) => Rc::ptr_eq(a, b),
            (Self::SpriteRenderer(a), Self::SpriteRenderer(b)) => Rc::ptr_eq(a, b),
            (Self::TextRenderer(a), Self::TextRenderer(b)) => Rc::ptr_eq(a, b),
            (Self::PointLight(a), Self::PointLight(b)) => Rc::ptr_eq(a, b),
            (Self::Spotlight(a), Self::Spotlight(b)) => Rc::ptr_eq(a, b),
            (Self::Script(a), Self::Script(b)) => Rc::ptr_eq(a, b),
            (Self::Rigidbody(a), Self::Rigidbody(b)) => Rc::ptr_eq(a, b),
            (Self::CharacterController(a), Self::CharacterController(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for ComponentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Component", self.kind())
    }
}

#[derive(Debug, Default)]
pub struct ComponentCache {
    slots: [Option<ComponentSlot>; ComponentKind::COUNT],
}

impl ComponentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: Component>(&self) -> Option<Rc<T>> {
        self.slots[T::KIND.index()].as_ref().and_then(T::from_slot)
    }

    pub fn slot(&self, kind: ComponentKind) -> Option<&ComponentSlot> {
        self.slots[kind.index()].as_ref()
    }

    pub fn insert<T: Component>(&mut self, component: Rc<T>) {
        self.slots[T::KIND.index()] = Some(T::into_slot(component));
    }

    /// Drop the entry for `kind`. Returns whether one was present.
    pub fn evict(&mut self, kind: ComponentKind) -> bool {
        self.slots[kind.index()].take().is_some()
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kinds(&self) -> Vec<ComponentKind> {
        self.slots.iter().flatten().map(ComponentSlot::kind).collect()
    }

    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::EntityId;
    use tessera_native::{HeadlessEngine, NativeEngine};

    fn engine() -> Rc<dyn NativeEngine> {
        Rc::new(HeadlessEngine::new())
    }

    #[test]
    fn test_insert_and_get() {
        let engine = engine();
        let mut cache = ComponentCache::new();
        let id = EntityId::from_raw(1);

        let transform = Rc::new(TransformComponent::bind(id, Rc::clone(&engine)));
        cache.insert(Rc::clone(&transform));

        let cached = cache.get::<TransformComponent>().unwrap();
        assert!(Rc::ptr_eq(&cached, &transform));
        assert!(cache.get::<RigidbodyComponent>().is_none());
        assert_eq!(cache.kinds(), vec![ComponentKind::Transform]);
    }

    #[test]
    fn test_evict_and_clear() {
        let engine = engine();
        let mut cache = ComponentCache::new();
        let id = EntityId::from_raw(1);

        cache.insert(Rc::new(NameComponent::bind(id, Rc::clone(&engine))));
        cache.insert(Rc::new(RigidbodyComponent::bind(id, Rc::clone(&engine))));
        assert_eq!(cache.len(), 2);

        assert!(cache.evict(ComponentKind::Rigidbody));
        assert!(!cache.evict(ComponentKind::Rigidbody));
        assert!(cache.contains(ComponentKind::Name));

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_slot_identity() {
        let engine = engine();
        let id = EntityId::from_raw(1);
        let a = Rc::new(SpotlightComponent::bind(id, Rc::clone(&engine)));
        let b = Rc::new(SpotlightComponent::bind(id, Rc::clone(&engine)));

        let slot_a = SpotlightComponent::into_slot(Rc::clone(&a));
        assert!(slot_a.ptr_eq(&SpotlightComponent::into_slot(a)));
        assert!(!slot_a.ptr_eq(&SpotlightComponent::into_slot(b)));
        assert_eq!(slot_a.kind(), ComponentKind::Spotlight);
        assert_eq!(slot_a.to_string(), "SpotlightComponent");
    }
}

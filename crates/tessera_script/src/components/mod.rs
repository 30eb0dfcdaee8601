// components/mod.rs - Typed component wrappers
//
// A wrapper holds nothing but the entity id and the engine handle. Every
// property read or write is a boundary call, so a wrapper never goes stale
// on its own; it only becomes meaningless once its entity is destroyed.

mod lights;
mod physics;
mod render;
mod transform;

use std::rc::Rc;

use tessera_core::glam::Vec3;
use tessera_core::{AssetHandle, AxisLock, Color, ComponentKind, EntityId, Transform};
use tessera_native::{ComponentCommand, ComponentField, FieldValue, NativeEngine};

use crate::cache::ComponentSlot;

pub use lights::{PointLightComponent, SpotlightComponent};
pub use physics::{CharacterControllerComponent, RigidbodyComponent};
pub use render::{MeshRendererComponent, SpriteRendererComponent, TextRendererComponent};
pub use transform::TransformComponent;

/// Maps a wrapper type to its component kind and cache slot.
pub trait Component: Sized + 'static {
    const KIND: ComponentKind;

    /// Bind a new wrapper to `(entity, KIND)`.
    fn bind(entity: EntityId, engine: Rc<dyn NativeEngine>) -> Self;

    fn into_slot(component: Rc<Self>) -> ComponentSlot;

    /// `None` when the slot holds another kind.
    fn from_slot(slot: &ComponentSlot) -> Option<Rc<Self>>;

    fn entity_id(&self) -> EntityId;
}

/// The `(entity, engine)` pair a wrapper reads and writes through.
pub(crate) struct Binding {
    entity: EntityId,
    engine: Rc<dyn NativeEngine>,
}

impl Binding {
    pub(crate) fn new(entity: EntityId, engine: Rc<dyn NativeEngine>) -> Self {
        Self { entity, engine }
    }

    pub(crate) fn entity(&self) -> EntityId {
        self.entity
    }

    pub(crate) fn engine(&self) -> &Rc<dyn NativeEngine> {
        &self.engine
    }

    fn get(&self, field: ComponentField) -> FieldValue {
        self.engine.get_field(self.entity, field)
    }

    pub(crate) fn set(&self, field: ComponentField, value: impl Into<FieldValue>) {
        self.engine.set_field(self.entity, field, value.into());
    }

    pub(crate) fn command(&self, command: ComponentCommand) {
        self.engine.component_command(self.entity, command);
    }

    pub(crate) fn bool(&self, field: ComponentField) -> bool {
        self.get(field).as_bool().unwrap_or_default()
    }

    pub(crate) fn float(&self, field: ComponentField) -> f32 {
        self.get(field).as_float().unwrap_or_default()
    }

    pub(crate) fn text(&self, field: ComponentField) -> String {
        self.get(field).into_text().unwrap_or_default()
    }

    pub(crate) fn vec3(&self, field: ComponentField) -> Vec3 {
        self.get(field).as_vec3().unwrap_or_default()
    }

    pub(crate) fn color(&self, field: ComponentField) -> Color {
        self.get(field).as_color().unwrap_or_default()
    }

    pub(crate) fn transform(&self, field: ComponentField) -> Transform {
        self.get(field).as_transform().unwrap_or_default()
    }

    pub(crate) fn asset(&self, field: ComponentField) -> AssetHandle {
        self.get(field).as_asset().unwrap_or_default()
    }

    pub(crate) fn axes(&self, field: ComponentField) -> AxisLock {
        self.get(field).as_axes().unwrap_or_default()
    }
}

/// Declare a wrapper struct and its `Component` impl.
///
/// The slot variant must share its name with the `ComponentKind` variant.
macro_rules! define_component {
    ($(#[$meta:meta])* $ty:ident, $kind:ident) => {
        $(#[$meta])*
        pub struct $ty {
            binding: $crate::components::Binding,
        }

        impl $crate::components::Component for $ty {
            const KIND: ::tessera_core::ComponentKind = ::tessera_core::ComponentKind::$kind;

            fn bind(
                entity: ::tessera_core::EntityId,
                engine: ::std::rc::Rc<dyn ::tessera_native::NativeEngine>,
            ) -> Self {
                Self {
                    binding: $crate::components::Binding::new(entity, engine),
                }
            }

            fn into_slot(component: ::std::rc::Rc<Self>) -> $crate::cache::ComponentSlot {
                $crate::cache::ComponentSlot::$kind(component)
            }

            fn from_slot(
                slot: &$crate::cache::ComponentSlot,
            ) -> Option<::std::rc::Rc<Self>> {
                match slot {
                    $crate::cache::ComponentSlot::$kind(component) => {
                        Some(::std::rc::Rc::clone(component))
                    }
                    _ => None,
                }
            }

            fn entity_id(&self) -> ::tessera_core::EntityId {
                self.binding.entity()
            }
        }

        impl ::std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("entity", &self.binding.entity())
                    .finish()
            }
        }
    };
}

pub(crate) use define_component;

define_component!(
    /// The entity's name tag.
    NameComponent,
    Name
);

impl NameComponent {
    pub fn tag(&self) -> String {
        self.binding.text(ComponentField::NameTag)
    }

    pub fn set_tag(&self, tag: &str) {
        self.binding.set(ComponentField::NameTag, tag);
    }
}

define_component!(
    /// Marks an entity as driven by a script. The instance itself is looked
    /// up through `ScriptHost`.
    ScriptComponent,
    Script
);

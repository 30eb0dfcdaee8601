//! Tessera Script
//!
//! The gameplay-facing API: entity handles with a per-handle component cache,
//! typed component wrappers, subsystem facades and the script host that
//! delivers engine callbacks to script instances.
//!
//! Everything here is single-threaded. Wrappers hold `Rc<dyn NativeEngine>`
//! and every property access is a boundary call.

pub mod assets;
pub mod cache;
pub mod components;
pub mod context;
pub mod entity;
pub mod error;
pub mod facades;
pub mod host;
pub mod random;

pub use assets::{Material, Mesh, Prefab, SceneAsset, Texture2D, Vertex};
pub use cache::{ComponentCache, ComponentSlot};
pub use components::{
    CharacterControllerComponent, Component, MeshRendererComponent, NameComponent,
    PointLightComponent, RigidbodyComponent, ScriptComponent, SpotlightComponent,
    SpriteRendererComponent, TextRendererComponent, TransformComponent,
};
pub use context::ScriptContext;
pub use entity::Entity;
pub use error::ScriptError;
pub use facades::{
    Application, Gizmos, HitInfo, Input, Log, Noise, Physics, Scene, SceneManager, Time,
};
pub use host::{AsAny, EntityScript, ScriptEvent, ScriptHost};
pub use random::Random;

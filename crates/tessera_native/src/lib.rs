//! Tessera Native Boundary
//!
//! The flat call interface scripts use to reach the engine, the fixed-layout
//! records that cross it, and `HeadlessEngine`, an in-process implementation.

pub mod command;
pub mod engine;
pub mod ffi;
pub mod field;
pub mod headless;

pub use command::ComponentCommand;
pub use engine::{GizmoShape, LogLevel, NativeEngine, PrefabPlacement};
pub use ffi::{ColorRecord, HitInfoRecord, TransformRecord, Vec2Record, Vec3Record, VertexRecord};
pub use field::{ComponentField, FieldValue};
pub use headless::{HeadlessEngine, PrefabTemplate, SceneTemplate};

//! Tessera Core
//!
//! Shared vocabulary for the script API and the native boundary:
//! - Entity and asset identifiers
//! - The closed set of component kinds
//! - Math value types (colors, transforms, quaternion helpers)
//! - Physics enums and frame timing

pub mod id;
pub mod kind;
pub mod math;
pub mod physics;
pub mod time;

pub use glam;

pub use id::{AssetHandle, EntityId};
pub use kind::ComponentKind;
pub use math::{Color, Transform};
pub use physics::{AxisLock, ForceMode, LayerMask};
pub use time::FrameClock;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

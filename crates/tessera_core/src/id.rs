//! Entity and asset identifiers.
//!
//! Both are opaque 64-bit values handed out by the native engine. `0` is
//! reserved in both spaces and never names anything.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an entity in the native scene graph.
///
/// A non-zero id is *not* proof that the entity exists: the engine may have
/// destroyed it since the id was handed out. Liveness always needs a native
/// query (`NativeEngine::is_entity_valid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    /// The null entity. Never valid.
    pub const INVALID: EntityId = EntityId(0);

    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` for the reserved null id.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Handle to an engine-owned asset (texture, mesh, material, prefab, scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetHandle(u64);

impl AssetHandle {
    pub const INVALID: AssetHandle = AssetHandle(0);

    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` if the handle is non-zero. Whether the asset is still
    /// loaded is a separate native query.
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0 != 0
    }
}

impl Default for AssetHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Asset({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_null() {
        assert!(EntityId::INVALID.is_null());
        assert!(EntityId::default().is_null());
        assert!(!EntityId::from_raw(7).is_null());
    }

    #[test]
    fn test_entity_id_equality_is_by_value() {
        assert_eq!(EntityId::from_raw(42), EntityId::from(42));
        assert_ne!(EntityId::from_raw(42), EntityId::INVALID);
    }

    #[test]
    fn test_display() {
        assert_eq!(EntityId::from_raw(3).to_string(), "Entity(3)");
        assert_eq!(AssetHandle::from_raw(9).to_string(), "Asset(9)");
    }

    #[test]
    fn test_asset_handle_is_set() {
        assert!(!AssetHandle::INVALID.is_set());
        assert!(AssetHandle::from_raw(1).is_set());
    }
}

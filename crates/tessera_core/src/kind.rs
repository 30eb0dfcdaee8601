// kind.rs - Closed set of component kinds
//
// Component kinds are a fixed enum rather than runtime type tokens. Both sides
// of the native boundary agree on the discriminants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every component category a script can attach to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum ComponentKind {
    Name = 0,
    Transform = 1,
    MeshRenderer = 2,
    SpriteRenderer = 3,
    TextRenderer = 4,
    PointLight = 5,
    Spotlight = 6,
    Script = 7,
    Rigidbody = 8,
    CharacterController = 9,
}

impl ComponentKind {
    /// Number of kinds; sizes per-kind lookup tables.
    pub const COUNT: usize = 10;

    /// All kinds in discriminant order.
    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::Name,
        ComponentKind::Transform,
        ComponentKind::MeshRenderer,
        ComponentKind::SpriteRenderer,
        ComponentKind::TextRenderer,
        ComponentKind::PointLight,
        ComponentKind::Spotlight,
        ComponentKind::Script,
        ComponentKind::Rigidbody,
        ComponentKind::CharacterController,
    ];

    /// Dense index in `0..COUNT`, for table lookups.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name for logs and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ComponentKind::Name => "Name",
            ComponentKind::Transform => "Transform",
            ComponentKind::MeshRenderer => "MeshRenderer",
            ComponentKind::SpriteRenderer => "SpriteRenderer",
            ComponentKind::TextRenderer => "TextRenderer",
            ComponentKind::PointLight => "PointLight",
            ComponentKind::Spotlight => "Spotlight",
            ComponentKind::Script => "Script",
            ComponentKind::Rigidbody => "Rigidbody",
            ComponentKind::CharacterController => "CharacterController",
        }
    }

    /// Kinds every entity carries from creation until destruction.
    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        matches!(self, ComponentKind::Name | ComponentKind::Transform)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_dense() {
        for (i, kind) in ComponentKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ComponentKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ComponentKind::COUNT);
    }

    #[test]
    fn test_intrinsic_kinds() {
        assert!(ComponentKind::Name.is_intrinsic());
        assert!(ComponentKind::Transform.is_intrinsic());
        assert!(!ComponentKind::Rigidbody.is_intrinsic());
    }

    #[test]
    fn test_deserialize_from_name() {
        let kind: ComponentKind = serde_json::from_str("\"MeshRenderer\"").unwrap();
        assert_eq!(kind, ComponentKind::MeshRenderer);
    }
}

//! Script-side errors
//!
//! Only programmer errors are reported here. Expected absences (a missing
//! component, an engine refusing an allocation) are `None`.

use tessera_core::{ComponentKind, EntityId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("texture dimensions must be non-zero (got {width}x{height})")]
    ZeroTextureDimension { width: u32, height: u32 },

    #[error("texture data has {actual} pixels, expected {expected}")]
    TextureDataLength { expected: usize, actual: usize },

    #[error("mesh vertex buffer is empty")]
    EmptyVertexBuffer,

    #[error("mesh index buffer is empty")]
    EmptyIndexBuffer,

    #[error("mesh index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("{entity} has no {kind} component")]
    MissingComponent { entity: EntityId, kind: ComponentKind },

    #[error("{0} is not a valid entity")]
    InvalidEntity(EntityId),

    #[error("{0} already has a script attached")]
    ScriptAlreadyAttached(EntityId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ScriptError::MissingComponent {
            entity: EntityId::from_raw(3),
            kind: ComponentKind::Rigidbody,
        };
        assert_eq!(err.to_string(), "Entity(3) has no Rigidbody component");
        assert_eq!(
            ScriptError::ZeroTextureDimension { width: 0, height: 4 }.to_string(),
            "texture dimensions must be non-zero (got 0x4)"
        );
    }
}

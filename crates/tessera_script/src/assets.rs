//! Script-side asset handles
//!
//! Construction arguments are validated here before any boundary call; the
//! engine refusing an allocation is reported as `Ok(None)`.

use std::rc::Rc;

use tessera_core::glam::{Vec2, Vec3};
use tessera_core::{AssetHandle, Color};
use tessera_native::ffi::color_records;
use tessera_native::{NativeEngine, VertexRecord};
use tracing::debug;

use crate::context::ScriptContext;
use crate::error::ScriptError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture2D {
    handle: AssetHandle,
    width: u32,
    height: u32,
}

impl Texture2D {
    /// Allocate a `width` x `height` texture, optionally filled with `data`.
    ///
    /// `data` must be empty or hold exactly `width * height` colors.
    pub fn create(
        ctx: &ScriptContext,
        width: u32,
        height: u32,
        data: &[Color],
    ) -> Result<Option<Texture2D>, ScriptError> {
        if width == 0 || height == 0 {
            return Err(ScriptError::ZeroTextureDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if !data.is_empty() && data.len() != expected {
            return Err(ScriptError::TextureDataLength {
                expected,
                actual: data.len(),
            });
        }

        let engine = ctx.engine();
        let Some(handle) = engine.texture_create(width, height) else {
            debug!(width, height, "engine refused texture");
            return Ok(None);
        };
        if !data.is_empty() {
            engine.texture_set_data(handle, color_records(data));
        }
        Ok(Some(Texture2D {
            handle,
            width,
            height,
        }))
    }

    /// Wrap an existing texture, reading its size from the engine.
    pub fn from_handle(engine: &Rc<dyn NativeEngine>, handle: AssetHandle) -> Option<Texture2D> {
        let (width, height) = engine.texture_size(handle)?;
        Some(Texture2D {
            handle,
            width,
            height,
        })
    }

    /// Replace every pixel. `data` must hold exactly `width * height` colors.
    pub fn set_data(&self, ctx: &ScriptContext, data: &[Color]) -> Result<(), ScriptError> {
        let expected = self.width as usize * self.height as usize;
        if data.len() != expected {
            return Err(ScriptError::TextureDataLength {
                expected,
                actual: data.len(),
            });
        }
        ctx.engine().texture_set_data(self.handle, color_records(data));
        Ok(())
    }

    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// One mesh vertex as scripts build it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            tangent: Vec3::ZERO,
            uv,
        }
    }
}

impl From<Vertex> for VertexRecord {
    fn from(v: Vertex) -> Self {
        VertexRecord {
            position: v.position.into(),
            normal: v.normal.into(),
            tangent: v.tangent.into(),
            uv: v.uv.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mesh {
    handle: AssetHandle,
}

impl Mesh {
    /// Upload a mesh. Every index must name a vertex.
    pub fn create(
        ctx: &ScriptContext,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<Option<Mesh>, ScriptError> {
        if vertices.is_empty() {
            return Err(ScriptError::EmptyVertexBuffer);
        }
        if indices.is_empty() {
            return Err(ScriptError::EmptyIndexBuffer);
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(ScriptError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let records: Vec<VertexRecord> = vertices.iter().copied().map(Into::into).collect();
        let mesh = ctx.engine().mesh_create(&records, indices).map(Mesh::from_handle);
        if mesh.is_none() {
            debug!(vertices = vertices.len(), indices = indices.len(), "engine refused mesh");
        }
        Ok(mesh)
    }

    pub fn from_handle(handle: AssetHandle) -> Mesh {
        Mesh { handle }
    }

    pub fn handle(&self) -> AssetHandle {
        self.handle
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    handle: AssetHandle,
}

impl Material {
    pub fn from_handle(handle: AssetHandle) -> Material {
        Material { handle }
    }

    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    pub fn set_albedo_texture(&self, ctx: &ScriptContext, texture: &Texture2D) {
        ctx.engine().material_set_albedo(self.handle, texture.handle());
    }
}

/// A prefab reference. Unset until assigned a handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Prefab {
    handle: AssetHandle,
}

impl Prefab {
    pub fn from_handle(handle: AssetHandle) -> Prefab {
        Prefab { handle }
    }

    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    pub fn is_set(&self) -> bool {
        self.handle.is_set()
    }
}

/// A scene reference. Unset until assigned a handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SceneAsset {
    handle: AssetHandle,
}

impl SceneAsset {
    pub fn from_handle(handle: AssetHandle) -> SceneAsset {
        SceneAsset { handle }
    }

    pub fn handle(&self) -> AssetHandle {
        self.handle
    }

    pub fn is_set(&self) -> bool {
        self.handle.is_set()
    }
}

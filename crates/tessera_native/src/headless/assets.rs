//! Asset table for the headless engine

use std::collections::HashMap;

use tessera_core::{AssetHandle, ComponentKind, Transform};

use crate::ffi::{ColorRecord, VertexRecord};

/// Largest texture edge the engine will allocate.
pub const MAX_TEXTURE_SIZE: u32 = 8192;

/// An entity tree instantiated from a prefab or scene asset.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabTemplate {
    pub name: String,
    /// Components added on top of Name and Transform.
    pub components: Vec<ComponentKind>,
    pub transform: Transform,
    pub children: Vec<PrefabTemplate>,
}

impl PrefabTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            transform: Transform::IDENTITY,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_component(mut self, kind: ComponentKind) -> Self {
        self.components.push(kind);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: PrefabTemplate) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneTemplate {
    pub name: String,
    pub entities: Vec<PrefabTemplate>,
}

#[derive(Debug, Clone)]
pub(crate) enum Asset {
    Texture {
        width: u32,
        height: u32,
        pixels: Vec<ColorRecord>,
    },
    Mesh {
        vertices: Vec<VertexRecord>,
        indices: Vec<u32>,
    },
    Material {
        albedo: AssetHandle,
    },
    Prefab(PrefabTemplate),
    Scene(SceneTemplate),
}

#[derive(Debug)]
pub(crate) struct AssetTable {
    next_handle: u64,
    assets: HashMap<AssetHandle, Asset>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            assets: HashMap::new(),
        }
    }

    pub fn insert(&mut self, asset: Asset) -> AssetHandle {
        let handle = AssetHandle::from_raw(self.next_handle);
        self.next_handle += 1;
        self.assets.insert(handle, asset);
        handle
    }

    pub fn get(&self, handle: AssetHandle) -> Option<&Asset> {
        self.assets.get(&handle)
    }

    pub fn get_mut(&mut self, handle: AssetHandle) -> Option<&mut Asset> {
        self.assets.get_mut(&handle)
    }

    pub fn contains(&self, handle: AssetHandle) -> bool {
        self.assets.contains_key(&handle)
    }

    pub fn create_texture(&mut self, width: u32, height: u32) -> Option<AssetHandle> {
        if width == 0 || height == 0 || width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
            return None;
        }
        Some(self.insert(Asset::Texture {
            width,
            height,
            pixels: vec![ColorRecord::default(); (width * height) as usize],
        }))
    }

    pub fn create_mesh(&mut self, vertices: &[VertexRecord], indices: &[u32]) -> Option<AssetHandle> {
        if vertices.is_empty() || indices.is_empty() {
            return None;
        }
        if indices.iter().any(|&i| i as usize >= vertices.len()) {
            return None;
        }
        Some(self.insert(Asset::Mesh {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        }))
    }
}

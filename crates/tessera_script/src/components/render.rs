use tessera_core::Color;
use tessera_native::{ComponentCommand, ComponentField};

use super::define_component;
use crate::assets::{Material, Mesh, Texture2D};

define_component!(MeshRendererComponent, MeshRenderer);

impl MeshRendererComponent {
    pub fn is_active(&self) -> bool {
        self.binding.bool(ComponentField::MeshRendererActive)
    }

    pub fn set_active(&self, active: bool) {
        self.binding.set(ComponentField::MeshRendererActive, active);
    }

    /// `None` when no mesh is assigned.
    pub fn mesh(&self) -> Option<Mesh> {
        let handle = self.binding.asset(ComponentField::MeshRendererMesh);
        handle.is_set().then(|| Mesh::from_handle(handle))
    }

    pub fn set_mesh(&self, mesh: &Mesh) {
        self.binding.set(ComponentField::MeshRendererMesh, mesh.handle());
    }

    pub fn casts_shadows(&self) -> bool {
        self.binding.bool(ComponentField::MeshRendererCastsShadows)
    }

    pub fn set_casts_shadows(&self, casts: bool) {
        self.binding.set(ComponentField::MeshRendererCastsShadows, casts);
    }

    pub fn has_material(&self, index: u32) -> bool {
        self.binding
            .engine()
            .mesh_material(self.binding.entity(), index)
            .is_some()
    }

    pub fn material(&self, index: u32) -> Option<Material> {
        self.binding
            .engine()
            .mesh_material(self.binding.entity(), index)
            .map(Material::from_handle)
    }

    /// Set the first material, adding the slot if the renderer has none.
    pub fn set_material(&self, material: &Material) {
        if self.has_material(0) {
            self.set_material_at(0, material);
        } else {
            self.binding
                .command(ComponentCommand::AddMaterial(material.handle()));
        }
    }

    /// Replace the material at `index`. Does nothing if the slot is empty.
    pub fn set_material_at(&self, index: u32, material: &Material) {
        if !self.has_material(index) {
            return;
        }
        self.binding.command(ComponentCommand::SetMaterial {
            index,
            material: material.handle(),
        });
    }
}

define_component!(SpriteRendererComponent, SpriteRenderer);

impl SpriteRendererComponent {
    pub fn is_active(&self) -> bool {
        self.binding.bool(ComponentField::SpriteRendererActive)
    }

    pub fn set_active(&self, active: bool) {
        self.binding.set(ComponentField::SpriteRendererActive, active);
    }

    /// `None` when no texture is assigned or the engine no longer knows it.
    pub fn texture(&self) -> Option<Texture2D> {
        let handle = self.binding.asset(ComponentField::SpriteRendererTexture);
        if !handle.is_set() {
            return None;
        }
        Texture2D::from_handle(self.binding.engine(), handle)
    }

    pub fn set_texture(&self, texture: &Texture2D) {
        self.binding
            .set(ComponentField::SpriteRendererTexture, texture.handle());
    }

    pub fn color(&self) -> Color {
        self.binding.color(ComponentField::SpriteRendererTint)
    }

    pub fn set_color(&self, color: Color) {
        self.binding.set(ComponentField::SpriteRendererTint, color);
    }

    pub fn flip_x(&self) -> bool {
        self.binding.bool(ComponentField::SpriteRendererFlipX)
    }

    pub fn set_flip_x(&self, flip: bool) {
        self.binding.set(ComponentField::SpriteRendererFlipX, flip);
    }

    pub fn flip_y(&self) -> bool {
        self.binding.bool(ComponentField::SpriteRendererFlipY)
    }

    pub fn set_flip_y(&self, flip: bool) {
        self.binding.set(ComponentField::SpriteRendererFlipY, flip);
    }
}

define_component!(TextRendererComponent, TextRenderer);

impl TextRendererComponent {
    pub fn text(&self) -> String {
        self.binding.text(ComponentField::TextRendererText)
    }

    pub fn set_text(&self, text: &str) {
        self.binding.set(ComponentField::TextRendererText, text);
    }

    pub fn color(&self) -> Color {
        self.binding.color(ComponentField::TextRendererColor)
    }

    pub fn set_color(&self, color: Color) {
        self.binding.set(ComponentField::TextRendererColor, color);
    }
}

//! In-process implementation of the native boundary
//!
//! `HeadlessEngine` keeps just enough state to answer every boundary call
//! deterministically: an entity store, an asset table, input and time, and
//! journals for logs, gizmos and forces. It is single-threaded; all state
//! sits behind `RefCell`s so the boundary can take `&self`.

mod assets;
mod noise;
mod physics;
mod stats;
mod world;

use std::cell::{Cell, RefCell, RefMut};

use tessera_core::glam::Vec3;
use tessera_core::{AssetHandle, ComponentKind, EntityId, FrameClock, ForceMode, LayerMask};
use tessera_services::{
    ButtonState, CursorMode, GamepadAxis, GamepadButton, InputState, KeyCode, MouseButton, Settings,
};
use tracing::{debug, trace, warn};

use crate::command::ComponentCommand;
use crate::engine::{GizmoShape, LogLevel, NativeEngine, PrefabPlacement};
use crate::ffi::{ColorRecord, HitInfoRecord, TransformRecord, Vec2Record, Vec3Record, VertexRecord};
use crate::field::{ComponentField, FieldValue};

pub use assets::{PrefabTemplate, SceneTemplate, MAX_TEXTURE_SIZE};
pub use noise::NoiseTable;
pub use physics::COLLIDER_RADIUS;
pub use stats::CallStats;

use assets::{Asset, AssetTable};
use physics::Collider;
use world::World;

#[derive(Debug)]
struct ApplicationState {
    vsync: bool,
    width: u32,
    height: u32,
    quit_requested: bool,
}

/// Headless engine backing tests and the runtime binary.
pub struct HeadlessEngine {
    world: RefCell<World>,
    assets: RefCell<AssetTable>,
    input: RefCell<InputState>,
    clock: RefCell<FrameClock>,
    noise: RefCell<NoiseTable>,
    application: RefCell<ApplicationState>,
    gravity: Cell<Vec3Record>,
    scene_name: RefCell<String>,
    logs: RefCell<Vec<(LogLevel, String)>>,
    gizmos: RefCell<Vec<(GizmoShape, ColorRecord)>>,
    forces: RefCell<Vec<(EntityId, ComponentCommand)>>,
    stats: RefCell<CallStats>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut clock = FrameClock::with_fixed_timestep(settings.time.fixed_timestep);
        clock.set_time_scale(settings.time.time_scale);

        Self {
            world: RefCell::new(World::new()),
            assets: RefCell::new(AssetTable::new()),
            input: RefCell::new(InputState::new()),
            clock: RefCell::new(clock),
            noise: RefCell::new(NoiseTable::new(settings.noise.seed)),
            application: RefCell::new(ApplicationState {
                vsync: settings.application.vsync,
                width: settings.application.width,
                height: settings.application.height,
                quit_requested: false,
            }),
            gravity: Cell::new(Vec3::from_array(settings.physics.gravity).into()),
            scene_name: RefCell::new("Untitled".to_string()),
            logs: RefCell::new(Vec::new()),
            gizmos: RefCell::new(Vec::new()),
            forces: RefCell::new(Vec::new()),
            stats: RefCell::new(CallStats::new()),
        }
    }

    fn record(&self, verb: &'static str) {
        self.stats.borrow_mut().increment(verb);
    }

    /// Number of boundary calls made with `verb` (the trait method name).
    pub fn calls(&self, verb: &str) -> usize {
        self.stats.borrow().get(verb)
    }

    pub fn reset_calls(&self) {
        self.stats.borrow_mut().reset_all();
    }

    /// Start a frame. Returns the number of fixed steps due.
    pub fn begin_frame(&self, raw_delta: f32) -> u32 {
        self.clock.borrow_mut().advance(raw_delta)
    }

    /// Entities the next `end_frame` will destroy, descendants included.
    /// They are still live, so scripts can read them one last time.
    pub fn pending_destroy(&self) -> Vec<EntityId> {
        self.world.borrow().pending_destroyed()
    }

    /// Finish a frame: destroy queued entities, age input and clear gizmos.
    ///
    /// Returns the destroyed ids, descendants included, so their scripts can
    /// be notified.
    pub fn end_frame(&self) -> Vec<EntityId> {
        let destroyed = self.world.borrow_mut().flush_destroyed();
        if !destroyed.is_empty() {
            debug!(count = destroyed.len(), "destroyed entities");
        }
        self.input.borrow_mut().end_frame();
        self.gizmos.borrow_mut().clear();
        destroyed
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.borrow().frame_count()
    }

    /// Feed input for the current frame.
    pub fn input_mut(&self) -> RefMut<'_, InputState> {
        self.input.borrow_mut()
    }

    pub fn set_window_size(&self, width: u32, height: u32) {
        let mut app = self.application.borrow_mut();
        app.width = width;
        app.height = height;
    }

    pub fn quit_requested(&self) -> bool {
        self.application.borrow().quit_requested
    }

    pub fn register_prefab(&self, template: PrefabTemplate) -> AssetHandle {
        self.assets.borrow_mut().insert(Asset::Prefab(template))
    }

    pub fn register_scene(&self, template: SceneTemplate) -> AssetHandle {
        self.assets.borrow_mut().insert(Asset::Scene(template))
    }

    pub fn create_material(&self) -> AssetHandle {
        self.assets.borrow_mut().insert(Asset::Material {
            albedo: AssetHandle::INVALID,
        })
    }

    pub fn material_albedo(&self, material: AssetHandle) -> Option<AssetHandle> {
        match self.assets.borrow().get(material) {
            Some(Asset::Material { albedo }) => Some(*albedo),
            _ => None,
        }
    }

    pub fn texture_data(&self, texture: AssetHandle) -> Option<Vec<ColorRecord>> {
        match self.assets.borrow().get(texture) {
            Some(Asset::Texture { pixels, .. }) => Some(pixels.clone()),
            _ => None,
        }
    }

    pub fn mesh_sizes(&self, mesh: AssetHandle) -> Option<(usize, usize)> {
        match self.assets.borrow().get(mesh) {
            Some(Asset::Mesh { vertices, indices }) => Some((vertices.len(), indices.len())),
            _ => None,
        }
    }

    /// Height last set by a character controller `Resize`.
    pub fn controller_height(&self, id: EntityId) -> Option<f32> {
        self.world
            .borrow()
            .component(id, ComponentKind::CharacterController)
            .and_then(|data| data.height)
    }

    pub fn logs(&self) -> Vec<(LogLevel, String)> {
        self.logs.borrow().clone()
    }

    /// Gizmos drawn since the last `end_frame`.
    pub fn gizmos(&self) -> Vec<(GizmoShape, ColorRecord)> {
        self.gizmos.borrow().clone()
    }

    /// Forces and torques applied since start-up.
    pub fn force_journal(&self) -> Vec<(EntityId, ComponentCommand)> {
        self.forces.borrow().clone()
    }

    fn spawn_template(&self, template: &PrefabTemplate, parent: EntityId, transform: TransformRecord) -> EntityId {
        let id = {
            let mut world = self.world.borrow_mut();
            let id = world.spawn(&template.name, parent);
            if let Some(node) = world.node_mut(id) {
                node.transform = transform.into();
            }
            for &kind in &template.components {
                world.add_component(id, kind);
            }
            id
        };
        for child in &template.children {
            self.spawn_template(child, id, child.transform.into());
        }
        id
    }

    fn colliders(&self) -> Vec<Collider> {
        let world = self.world.borrow();
        world
            .ids()
            .filter(|&id| {
                world.node(id).is_some_and(|n| n.active)
                    && (world.has_component(id, ComponentKind::Rigidbody)
                        || world.has_component(id, ComponentKind::CharacterController))
            })
            .map(|id| Collider {
                entity: id,
                center: world.world_transform(id).position,
            })
            .collect()
    }
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeEngine for HeadlessEngine {
    fn quit(&self) {
        self.record("quit");
        self.application.borrow_mut().quit_requested = true;
    }

    fn vsync(&self) -> bool {
        self.record("vsync");
        self.application.borrow().vsync
    }

    fn set_vsync(&self, enabled: bool) {
        self.record("set_vsync");
        self.application.borrow_mut().vsync = enabled;
    }

    fn window_size(&self) -> (u32, u32) {
        self.record("window_size");
        let app = self.application.borrow();
        (app.width, app.height)
    }

    fn noise_set_seed(&self, seed: i32) {
        self.record("noise_set_seed");
        *self.noise.borrow_mut() = NoiseTable::new(seed);
    }

    fn noise_simplex(&self, x: f32, y: f32) -> f32 {
        self.record("noise_simplex");
        self.noise.borrow().simplex(x, y)
    }

    fn noise_perlin(&self, x: f32, y: f32) -> f32 {
        self.record("noise_perlin");
        self.noise.borrow().perlin(x, y)
    }

    fn delta_time(&self) -> f32 {
        self.record("delta_time");
        self.clock.borrow().delta()
    }

    fn time_scale(&self) -> f32 {
        self.record("time_scale");
        self.clock.borrow().time_scale()
    }

    fn set_time_scale(&self, scale: f32) {
        self.record("set_time_scale");
        self.clock.borrow_mut().set_time_scale(scale);
    }

    fn asset_is_valid(&self, handle: AssetHandle) -> bool {
        self.record("asset_is_valid");
        self.assets.borrow().contains(handle)
    }

    fn texture_create(&self, width: u32, height: u32) -> Option<AssetHandle> {
        self.record("texture_create");
        let handle = self.assets.borrow_mut().create_texture(width, height);
        if handle.is_none() {
            warn!(width, height, "texture allocation refused");
        }
        handle
    }

    fn texture_size(&self, texture: AssetHandle) -> Option<(u32, u32)> {
        self.record("texture_size");
        match self.assets.borrow().get(texture) {
            Some(Asset::Texture { width, height, .. }) => Some((*width, *height)),
            _ => None,
        }
    }

    fn texture_set_data(&self, texture: AssetHandle, data: &[ColorRecord]) {
        self.record("texture_set_data");
        match self.assets.borrow_mut().get_mut(texture) {
            Some(Asset::Texture { pixels, .. }) if pixels.len() == data.len() => {
                pixels.copy_from_slice(data);
            }
            Some(Asset::Texture { pixels, .. }) => {
                warn!(%texture, expected = pixels.len(), got = data.len(), "texture data length mismatch");
            }
            _ => warn!(%texture, "set_data on unknown texture"),
        }
    }

    fn mesh_create(&self, vertices: &[VertexRecord], indices: &[u32]) -> Option<AssetHandle> {
        self.record("mesh_create");
        self.assets.borrow_mut().create_mesh(vertices, indices)
    }

    fn material_set_albedo(&self, material: AssetHandle, texture: AssetHandle) {
        self.record("material_set_albedo");
        match self.assets.borrow_mut().get_mut(material) {
            Some(Asset::Material { albedo }) => *albedo = texture,
            _ => warn!(%material, "set_albedo on unknown material"),
        }
    }

    fn load_scene(&self, scene: AssetHandle) {
        self.record("load_scene");
        let template = match self.assets.borrow().get(scene) {
            Some(Asset::Scene(template)) => template.clone(),
            _ => {
                warn!(%scene, "load_scene on unknown scene asset");
                return;
            }
        };

        {
            let mut world = self.world.borrow_mut();
            for root in world.roots() {
                world.queue_destroy(root);
            }
        }
        for entity in &template.entities {
            self.spawn_template(entity, EntityId::INVALID, entity.transform.into());
        }
        debug!(scene = %template.name, entities = template.entities.len(), "loaded scene");
        *self.scene_name.borrow_mut() = template.name;
    }

    fn current_scene_name(&self) -> String {
        self.record("current_scene_name");
        self.scene_name.borrow().clone()
    }

    fn is_entity_valid(&self, id: EntityId) -> bool {
        self.record("is_entity_valid");
        self.world.borrow().is_valid(id)
    }

    fn entity_by_name(&self, name: &str) -> EntityId {
        self.record("entity_by_name");
        self.world.borrow().find_by_name(name)
    }

    fn create_entity(&self, name: &str) -> EntityId {
        self.record("create_entity");
        self.world.borrow_mut().spawn(name, EntityId::INVALID)
    }

    fn destroy_entity(&self, id: EntityId) {
        self.record("destroy_entity");
        self.world.borrow_mut().queue_destroy(id);
    }

    fn destroy_all_children(&self, id: EntityId) {
        self.record("destroy_all_children");
        let mut world = self.world.borrow_mut();
        let children = world.node(id).map(|n| n.children.clone()).unwrap_or_default();
        for child in children {
            world.queue_destroy(child);
        }
    }

    fn instantiate_prefab(&self, prefab: AssetHandle, parent: EntityId, placement: &PrefabPlacement) -> EntityId {
        self.record("instantiate_prefab");
        if !parent.is_null() && !self.world.borrow().is_valid(parent) {
            warn!(%prefab, %parent, "instantiate under unknown parent");
            return EntityId::INVALID;
        }
        let template = match self.assets.borrow().get(prefab) {
            Some(Asset::Prefab(template)) => template.clone(),
            _ => {
                warn!(%prefab, "instantiate of unknown prefab");
                return EntityId::INVALID;
            }
        };
        let transform = placement.apply(template.transform.into());
        self.spawn_template(&template, parent, transform)
    }

    fn entity_is_active(&self, id: EntityId) -> bool {
        self.record("entity_is_active");
        self.world.borrow().node(id).is_some_and(|n| n.active)
    }

    fn set_entity_active(&self, id: EntityId, active: bool) {
        self.record("set_entity_active");
        if let Some(node) = self.world.borrow_mut().node_mut(id) {
            node.active = active;
        }
    }

    fn entity_parent(&self, id: EntityId) -> EntityId {
        self.record("entity_parent");
        self.world.borrow().node(id).map_or(EntityId::INVALID, |n| n.parent)
    }

    fn set_entity_parent(&self, id: EntityId, parent: EntityId) {
        self.record("set_entity_parent");
        self.world.borrow_mut().set_parent(id, parent);
    }

    fn entity_children(&self, id: EntityId) -> Vec<EntityId> {
        self.record("entity_children");
        self.world.borrow().node(id).map(|n| n.children.clone()).unwrap_or_default()
    }

    fn entity_child_by_name(&self, id: EntityId, name: &str) -> EntityId {
        self.record("entity_child_by_name");
        self.world.borrow().child_by_name(id, name)
    }

    fn add_component(&self, id: EntityId, kind: ComponentKind) {
        self.record("add_component");
        if self.world.borrow_mut().add_component(id, kind) {
            trace!(entity = %id, %kind, "component added");
        } else {
            warn!(entity = %id, %kind, "add_component ignored: invalid entity or duplicate");
        }
    }

    fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.record("has_component");
        self.world.borrow().has_component(id, kind)
    }

    fn remove_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.record("remove_component");
        self.world.borrow_mut().remove_component(id, kind)
    }

    fn get_field(&self, id: EntityId, field: ComponentField) -> FieldValue {
        self.record("get_field");
        self.world.borrow().get_field(id, field).unwrap_or_else(|| {
            warn!(entity = %id, ?field, "read of absent component");
            field.default_value()
        })
    }

    fn set_field(&self, id: EntityId, field: ComponentField, value: FieldValue) {
        self.record("set_field");
        if !self.world.borrow_mut().set_field(id, field, value) {
            trace!(entity = %id, ?field, "field write ignored");
        }
    }

    fn component_command(&self, id: EntityId, command: ComponentCommand) {
        self.record("component_command");
        if command.is_force() {
            if self.world.borrow().has_component(id, ComponentKind::Rigidbody) {
                self.forces.borrow_mut().push((id, command));
            }
            return;
        }
        if !self.world.borrow_mut().apply_command(id, command) {
            trace!(entity = %id, verb = command.verb(), "command ignored");
        }
    }

    fn mesh_material(&self, id: EntityId, index: u32) -> Option<AssetHandle> {
        self.record("mesh_material");
        self.world
            .borrow()
            .component(id, ComponentKind::MeshRenderer)
            .and_then(|data| data.materials.get(index as usize).copied())
    }

    fn log_message(&self, level: LogLevel, message: &str) {
        self.record("log_message");
        self.logs.borrow_mut().push((level, message.to_string()));
    }

    fn draw_gizmo(&self, shape: GizmoShape, color: ColorRecord) {
        self.record("draw_gizmo");
        self.gizmos.borrow_mut().push((shape, color));
    }

    fn key_state(&self, key: KeyCode) -> ButtonState {
        self.record("key_state");
        self.input.borrow().key_state(key)
    }

    fn mouse_button_state(&self, button: MouseButton) -> ButtonState {
        self.record("mouse_button_state");
        self.input.borrow().mouse_button_state(button)
    }

    fn gamepad_button_state(&self, button: GamepadButton) -> ButtonState {
        self.record("gamepad_button_state");
        self.input.borrow().gamepad_button_state(button)
    }

    fn mouse_position(&self) -> Vec2Record {
        self.record("mouse_position");
        self.input.borrow().mouse_position().into()
    }

    fn mouse_delta(&self) -> Vec2Record {
        self.record("mouse_delta");
        self.input.borrow().mouse_delta().into()
    }

    fn scroll_delta(&self) -> Vec2Record {
        self.record("scroll_delta");
        self.input.borrow().scroll_delta().into()
    }

    fn cursor_mode(&self) -> CursorMode {
        self.record("cursor_mode");
        self.input.borrow().cursor_mode()
    }

    fn set_cursor_mode(&self, mode: CursorMode) {
        self.record("set_cursor_mode");
        self.input.borrow_mut().set_cursor_mode(mode);
    }

    fn gamepad_axis(&self, axis: GamepadAxis) -> f32 {
        self.record("gamepad_axis");
        self.input.borrow().gamepad_axis(axis)
    }

    fn raycast(
        &self,
        origin: Vec3Record,
        direction: Vec3Record,
        max_distance: f32,
        mask: Option<LayerMask>,
    ) -> Option<HitInfoRecord> {
        self.record("raycast");
        // Every collider sits on the default layer.
        if mask.is_some_and(|m| !m.intersects(LayerMask::default())) {
            return None;
        }
        physics::raycast(&self.colliders(), origin.into(), direction.into(), max_distance)
    }

    fn sphere_cast(
        &self,
        origin: Vec3Record,
        direction: Vec3Record,
        radius: f32,
        max_distance: f32,
    ) -> Option<HitInfoRecord> {
        self.record("sphere_cast");
        physics::sphere_cast(&self.colliders(), origin.into(), direction.into(), radius, max_distance)
    }

    fn overlap_sphere(&self, origin: Vec3Record, radius: f32) -> Vec<EntityId> {
        self.record("overlap_sphere");
        physics::overlap_sphere(&self.colliders(), origin.into(), radius)
    }

    fn gravity(&self) -> Vec3Record {
        self.record("gravity");
        self.gravity.get()
    }

    fn set_gravity(&self, gravity: Vec3Record) {
        self.record("set_gravity");
        self.gravity.set(gravity);
    }

    fn add_radial_impulse(&self, origin: Vec3Record, radius: f32, strength: f32) {
        self.record("add_radial_impulse");
        if radius <= 0.0 {
            return;
        }
        let origin = Vec3::from(origin);
        let world = self.world.borrow();
        let mut forces = self.forces.borrow_mut();
        for id in world.ids() {
            if !world.has_component(id, ComponentKind::Rigidbody) {
                continue;
            }
            let offset = world.world_transform(id).position - origin;
            let distance = offset.length();
            if distance > radius {
                continue;
            }
            let falloff = 1.0 - distance / radius;
            forces.push((
                id,
                ComponentCommand::AddForce {
                    force: (offset.normalize_or_zero() * strength * falloff).into(),
                    mode: ForceMode::Impulse,
                },
            ));
        }
    }
}

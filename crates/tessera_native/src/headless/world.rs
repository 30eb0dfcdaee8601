//! Entity store for the headless engine
//!
//! Entities live in an ordered map so iteration is in ascending id order.
//! Name and Transform are stored on the node itself; other components keep
//! their fields in a sparse map and fall back to field defaults.

use std::collections::{BTreeMap, HashMap, HashSet};

use tessera_core::glam::{Mat3, Mat4, Quat, Vec3};
use tessera_core::math::{euler_from_quat, quat_from_euler};
use tessera_core::{AssetHandle, ComponentKind, EntityId, Transform};
use tracing::{trace, warn};

use crate::command::ComponentCommand;
use crate::field::{ComponentField, FieldValue};

#[derive(Debug, Clone, Default)]
pub(crate) struct ComponentData {
    fields: HashMap<ComponentField, FieldValue>,
    pub materials: Vec<AssetHandle>,
    pub height: Option<f32>,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub name: String,
    pub active: bool,
    pub parent: EntityId,
    pub children: Vec<EntityId>,
    pub transform: Transform,
    pub components: HashMap<ComponentKind, ComponentData>,
}

impl Node {
    fn new(name: &str) -> Self {
        let mut components = HashMap::new();
        components.insert(ComponentKind::Name, ComponentData::default());
        components.insert(ComponentKind::Transform, ComponentData::default());
        Self {
            name: name.to_string(),
            active: true,
            parent: EntityId::INVALID,
            children: Vec::new(),
            transform: Transform::IDENTITY,
            components,
        }
    }
}

#[derive(Debug)]
pub(crate) struct World {
    next_id: u64,
    nodes: BTreeMap<EntityId, Node>,
    pending_destroy: Vec<EntityId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            nodes: BTreeMap::new(),
            pending_destroy: Vec::new(),
        }
    }

    pub fn spawn(&mut self, name: &str, parent: EntityId) -> EntityId {
        let id = EntityId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(name));
        if !parent.is_null() {
            self.attach(id, parent);
        }
        trace!(entity = %id, name, "spawned entity");
        id
    }

    pub fn is_valid(&self, id: EntityId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: EntityId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: EntityId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn roots(&self) -> Vec<EntityId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_null())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Lowest id with a matching name.
    pub fn find_by_name(&self, name: &str) -> EntityId {
        self.nodes
            .iter()
            .find(|(_, node)| node.name == name)
            .map_or(EntityId::INVALID, |(id, _)| *id)
    }

    pub fn child_by_name(&self, parent: EntityId, name: &str) -> EntityId {
        self.nodes
            .get(&parent)
            .and_then(|node| {
                node.children
                    .iter()
                    .copied()
                    .find(|child| self.nodes.get(child).is_some_and(|c| c.name == name))
            })
            .unwrap_or(EntityId::INVALID)
    }

    fn is_descendant(&self, id: EntityId, ancestor: EntityId) -> bool {
        let mut current = self.nodes.get(&id).map(|n| n.parent);
        while let Some(parent) = current {
            if parent.is_null() {
                return false;
            }
            if parent == ancestor {
                return true;
            }
            current = self.nodes.get(&parent).map(|n| n.parent);
        }
        false
    }

    fn detach(&mut self, id: EntityId) {
        let Some(old_parent) = self.nodes.get(&id).map(|n| n.parent) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&old_parent) {
            parent.children.retain(|child| *child != id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = EntityId::INVALID;
        }
    }

    fn attach(&mut self, id: EntityId, parent: EntityId) {
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(id);
        } else {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }

    /// Reparent `id`. An invalid `parent` makes it a root. Cycles are refused.
    pub fn set_parent(&mut self, id: EntityId, parent: EntityId) {
        if !self.is_valid(id) {
            return;
        }
        if !parent.is_null() && (parent == id || !self.is_valid(parent) || self.is_descendant(parent, id)) {
            warn!(entity = %id, parent = %parent, "refusing invalid reparent");
            return;
        }
        self.detach(id);
        if !parent.is_null() {
            self.attach(id, parent);
        }
    }

    pub fn world_matrix(&self, id: EntityId) -> Mat4 {
        let mut matrix = Mat4::IDENTITY;
        let mut current = id;
        while let Some(node) = self.nodes.get(&current) {
            matrix = node.transform.to_matrix() * matrix;
            current = node.parent;
        }
        matrix
    }

    pub fn world_transform(&self, id: EntityId) -> Transform {
        let (scale, rotation, position) = self.world_matrix(id).to_scale_rotation_translation();
        Transform {
            position,
            rotation: euler_from_quat(rotation),
            scale,
        }
    }

    pub fn queue_destroy(&mut self, id: EntityId) {
        if self.is_valid(id) && !self.pending_destroy.contains(&id) {
            self.pending_destroy.push(id);
        }
    }

    /// Everything the next flush will remove, descendants included, in
    /// removal order. The entities are still live.
    pub fn pending_destroyed(&self) -> Vec<EntityId> {
        let mut seen = HashSet::new();
        let mut destroyed = Vec::new();

        for &root in &self.pending_destroy {
            let mut stack = vec![root];
            while let Some(id) = stack.pop() {
                if !seen.insert(id) {
                    continue;
                }
                if let Some(node) = self.nodes.get(&id) {
                    destroyed.push(id);
                    stack.extend(node.children.iter().rev().copied());
                }
            }
        }
        destroyed
    }

    /// Destroy everything queued, descendants included. Returns the removed ids.
    pub fn flush_destroyed(&mut self) -> Vec<EntityId> {
        let destroyed = self.pending_destroyed();
        self.pending_destroy.clear();

        for &id in &destroyed {
            self.detach(id);
        }
        for &id in &destroyed {
            self.nodes.remove(&id);
        }
        destroyed
    }

    pub fn add_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) if !node.components.contains_key(&kind) => {
                node.components.insert(kind, ComponentData::default());
                true
            }
            _ => false,
        }
    }

    pub fn has_component(&self, id: EntityId, kind: ComponentKind) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.components.contains_key(&kind))
    }

    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> bool {
        if kind.is_intrinsic() {
            return false;
        }
        self.nodes
            .get_mut(&id)
            .is_some_and(|node| node.components.remove(&kind).is_some())
    }

    pub fn component(&self, id: EntityId, kind: ComponentKind) -> Option<&ComponentData> {
        self.nodes.get(&id)?.components.get(&kind)
    }

    /// `None` when the entity or the owning component is missing.
    pub fn get_field(&self, id: EntityId, field: ComponentField) -> Option<FieldValue> {
        let node = self.nodes.get(&id)?;
        let data = node.components.get(&field.kind())?;
        let value = match field {
            ComponentField::NameTag => FieldValue::from(node.name.as_str()),
            ComponentField::TransformLocal => node.transform.into(),
            ComponentField::TransformWorld => self.world_transform(id).into(),
            ComponentField::TransformPosition | ComponentField::RigidbodyPosition => {
                node.transform.position.into()
            }
            ComponentField::TransformRotation | ComponentField::RigidbodyRotation => {
                node.transform.rotation.into()
            }
            ComponentField::TransformScale => node.transform.scale.into(),
            other => data
                .fields
                .get(&other)
                .cloned()
                .unwrap_or_else(|| other.default_value()),
        };
        Some(value)
    }

    /// Returns whether the write was applied.
    pub fn set_field(&mut self, id: EntityId, field: ComponentField, value: FieldValue) -> bool {
        if !value.same_type(&field.default_value()) {
            warn!(entity = %id, ?field, ?value, "field type mismatch");
            return false;
        }
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if !node.components.contains_key(&field.kind()) {
            return false;
        }

        match field {
            ComponentField::NameTag => {
                if let Some(name) = value.into_text() {
                    node.name = name;
                }
            }
            ComponentField::TransformLocal => {
                if let Some(t) = value.as_transform() {
                    node.transform = t;
                }
            }
            ComponentField::TransformWorld => {
                warn!(entity = %id, "world transform is read-only");
                return false;
            }
            ComponentField::TransformPosition | ComponentField::RigidbodyPosition => {
                if let Some(v) = value.as_vec3() {
                    node.transform.position = v;
                }
            }
            ComponentField::TransformRotation | ComponentField::RigidbodyRotation => {
                if let Some(v) = value.as_vec3() {
                    node.transform.rotation = v;
                }
            }
            ComponentField::TransformScale => {
                if let Some(v) = value.as_vec3() {
                    node.transform.scale = v;
                }
            }
            other => {
                if let Some(data) = node.components.get_mut(&other.kind()) {
                    data.fields.insert(other, value);
                }
            }
        }
        true
    }

    /// Apply a non-force command. Returns whether it was applied.
    pub fn apply_command(&mut self, id: EntityId, command: ComponentCommand) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if !node.components.contains_key(&command.kind()) {
            return false;
        }
        let transform = &mut node.transform;

        match command {
            ComponentCommand::Translate(delta) => transform.position += Vec3::from(delta),
            ComponentCommand::Rotate(delta) => transform.rotation += Vec3::from(delta),
            ComponentCommand::RotateAround { point, axis, angle } => {
                let axis = Vec3::from(axis).normalize_or_zero();
                if axis == Vec3::ZERO {
                    return false;
                }
                let point = Vec3::from(point);
                let orbit = Quat::from_axis_angle(axis, angle);
                transform.position = point + orbit * (transform.position - point);
                transform.rotation = euler_from_quat(orbit * quat_from_euler(transform.rotation));
            }
            ComponentCommand::LookAt { target, up } => {
                let forward = (Vec3::from(target) - transform.position).normalize_or_zero();
                let right = Vec3::from(up).cross(forward).normalize_or_zero();
                if forward == Vec3::ZERO || right == Vec3::ZERO {
                    return false;
                }
                let up = forward.cross(right);
                let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, forward));
                transform.rotation = euler_from_quat(rotation);
            }
            ComponentCommand::Teleport { position, rotation } => {
                transform.position = position.into();
                transform.rotation = rotation.into();
            }
            ComponentCommand::Move { displacement } => {
                transform.position += Vec3::from(displacement);
            }
            ComponentCommand::Resize { height } => {
                if let Some(data) = node.components.get_mut(&ComponentKind::CharacterController) {
                    data.height = Some(height);
                }
            }
            ComponentCommand::AddMaterial(material) => {
                if let Some(data) = node.components.get_mut(&ComponentKind::MeshRenderer) {
                    data.materials.push(material);
                }
            }
            ComponentCommand::SetMaterial { index, material } => {
                let Some(slot) = node
                    .components
                    .get_mut(&ComponentKind::MeshRenderer)
                    .and_then(|data| data.materials.get_mut(index as usize))
                else {
                    return false;
                };
                *slot = material;
            }
            ComponentCommand::AddForce { .. }
            | ComponentCommand::AddForceAtPosition { .. }
            | ComponentCommand::AddTorque { .. } => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_spawn_has_intrinsic_components() {
        let mut world = World::new();
        let id = world.spawn("Player", EntityId::INVALID);
        assert_eq!(id.raw(), 1);
        assert!(world.has_component(id, ComponentKind::Name));
        assert!(world.has_component(id, ComponentKind::Transform));
        assert!(!world.remove_component(id, ComponentKind::Transform));
        assert!(!world.remove_component(id, ComponentKind::Name));
    }

    #[test]
    fn test_duplicate_add_refused() {
        let mut world = World::new();
        let id = world.spawn("Crate", EntityId::INVALID);
        assert!(world.add_component(id, ComponentKind::Rigidbody));
        assert!(!world.add_component(id, ComponentKind::Rigidbody));
        assert!(world.remove_component(id, ComponentKind::Rigidbody));
        assert!(!world.remove_component(id, ComponentKind::Rigidbody));
    }

    #[test]
    fn test_destroy_is_deferred_and_recursive() {
        let mut world = World::new();
        let root = world.spawn("Root", EntityId::INVALID);
        let child = world.spawn("Child", root);
        let grandchild = world.spawn("Grandchild", child);
        let other = world.spawn("Other", EntityId::INVALID);

        world.queue_destroy(root);
        assert!(world.is_valid(root));
        assert_eq!(world.pending_destroyed(), vec![root, child, grandchild]);
        assert!(world.is_valid(grandchild));

        let destroyed = world.flush_destroyed();
        assert_eq!(destroyed, vec![root, child, grandchild]);
        assert!(!world.is_valid(grandchild));
        assert!(world.is_valid(other));
        assert!(world.flush_destroyed().is_empty());
    }

    #[test]
    fn test_destroy_child_detaches_from_parent() {
        let mut world = World::new();
        let root = world.spawn("Root", EntityId::INVALID);
        let child = world.spawn("Child", root);
        world.queue_destroy(child);
        world.flush_destroyed();
        assert!(world.node(root).unwrap().children.is_empty());
    }

    #[test]
    fn test_reparent_refuses_cycles() {
        let mut world = World::new();
        let a = world.spawn("A", EntityId::INVALID);
        let b = world.spawn("B", a);
        world.set_parent(a, b);
        assert_eq!(world.node(a).unwrap().parent, EntityId::INVALID);

        world.set_parent(b, EntityId::INVALID);
        assert!(world.node(a).unwrap().children.is_empty());
        assert_eq!(world.roots(), vec![a, b]);
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut world = World::new();
        let parent = world.spawn("Parent", EntityId::INVALID);
        let child = world.spawn("Child", parent);
        world.node_mut(parent).unwrap().transform.position = Vec3::new(10.0, 0.0, 0.0);
        world.node_mut(child).unwrap().transform.position = Vec3::new(0.0, 2.0, 0.0);

        let world_t = world.world_transform(child);
        assert!(approx(world_t.position, Vec3::new(10.0, 2.0, 0.0)));
        assert!(approx(world_t.scale, Vec3::ONE));
    }

    #[test]
    fn test_fields_default_and_type_check() {
        let mut world = World::new();
        let id = world.spawn("Lamp", EntityId::INVALID);
        assert!(world.get_field(id, ComponentField::PointLightRange).is_none());

        world.add_component(id, ComponentKind::PointLight);
        assert_eq!(
            world.get_field(id, ComponentField::PointLightRange),
            Some(FieldValue::Float(10.0))
        );
        assert!(!world.set_field(id, ComponentField::PointLightRange, FieldValue::Bool(true)));
        assert!(world.set_field(id, ComponentField::PointLightRange, 3.0.into()));
        assert_eq!(
            world.get_field(id, ComponentField::PointLightRange),
            Some(FieldValue::Float(3.0))
        );
    }

    #[test]
    fn test_kinematic_commands() {
        let mut world = World::new();
        let id = world.spawn("Mover", EntityId::INVALID);

        assert!(world.apply_command(id, ComponentCommand::Translate(Vec3::X.into())));
        assert!(world.apply_command(
            id,
            ComponentCommand::RotateAround {
                point: Vec3::ZERO.into(),
                axis: Vec3::Y.into(),
                angle: std::f32::consts::FRAC_PI_2,
            }
        ));
        let t = world.node(id).unwrap().transform;
        assert!(approx(t.position, Vec3::new(0.0, 0.0, -1.0)));

        // Character controller commands need the component.
        assert!(!world.apply_command(id, ComponentCommand::Resize { height: 2.0 }));
    }

    #[test]
    fn test_look_at() {
        let mut world = World::new();
        let id = world.spawn("Camera", EntityId::INVALID);
        assert!(world.apply_command(
            id,
            ComponentCommand::LookAt {
                target: Vec3::new(5.0, 0.0, 0.0).into(),
                up: Vec3::Y.into(),
            }
        ));
        let rotation = quat_from_euler(world.node(id).unwrap().transform.rotation);
        assert!(approx(rotation * Vec3::Z, Vec3::X));
    }

    #[test]
    fn test_set_material_needs_existing_slot() {
        let mut world = World::new();
        let id = world.spawn("Mesh", EntityId::INVALID);
        world.add_component(id, ComponentKind::MeshRenderer);
        let material = AssetHandle::from_raw(4);

        assert!(!world.apply_command(id, ComponentCommand::SetMaterial { index: 0, material }));
        assert!(world.apply_command(id, ComponentCommand::AddMaterial(material)));
        assert!(world.apply_command(
            id,
            ComponentCommand::SetMaterial {
                index: 0,
                material: AssetHandle::from_raw(5)
            }
        ));
        let data = world.component(id, ComponentKind::MeshRenderer).unwrap();
        assert_eq!(data.materials, vec![AssetHandle::from_raw(5)]);
    }
}

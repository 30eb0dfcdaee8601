//! Cache coherence and handle identity against the headless engine.

use std::rc::Rc;

use tessera_core::{ComponentKind, EntityId};
use tessera_native::{HeadlessEngine, NativeEngine};
use tessera_script::{
    Component, ComponentSlot, Entity, MeshRendererComponent, RigidbodyComponent, ScriptContext,
    TransformComponent,
};

fn setup() -> (Rc<HeadlessEngine>, ScriptContext) {
    let headless = Rc::new(HeadlessEngine::new());
    let ctx = ScriptContext::with_seed(headless.clone(), 0);
    (headless, ctx)
}

#[test]
fn test_repeated_get_returns_same_wrapper() {
    let (_headless, ctx) = setup();
    let player = ctx.scene().create_entity("Player");
    player.add_component::<MeshRendererComponent>().unwrap();

    let first = player.get_component::<TransformComponent>().unwrap();
    let second = player.get_component::<TransformComponent>().unwrap();
    assert!(Rc::ptr_eq(&first, &second));

    let renderer = player.get_component::<MeshRendererComponent>().unwrap();
    let again = player.add_component::<MeshRendererComponent>().unwrap();
    assert!(Rc::ptr_eq(&renderer, &again));
}

#[test]
fn test_remove_absent_component_is_false() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Empty");
    entity.transform().unwrap();
    let cached = entity.cache().kinds();

    assert!(!entity.remove_component::<MeshRendererComponent>());
    assert_eq!(entity.cache().kinds(), cached);
    assert_eq!(headless.calls("remove_component"), 1);
}

#[test]
fn test_remove_evicts_cached_wrapper() {
    let (_headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Body");
    let first = entity.add_component::<RigidbodyComponent>().unwrap();

    assert!(entity.remove_component::<RigidbodyComponent>());
    assert!(!entity.cache().contains(ComponentKind::Rigidbody));
    assert!(entity.get_component::<RigidbodyComponent>().is_none());

    let second = entity.add_component::<RigidbodyComponent>().unwrap();
    assert!(!Rc::ptr_eq(&first, &second));
}

#[test]
fn test_engine_side_removal_is_observed() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Body");
    entity.add_component::<RigidbodyComponent>().unwrap();
    assert!(entity.cache().contains(ComponentKind::Rigidbody));

    // Removed by engine logic, behind the script's back.
    assert!(headless.remove_component(entity.id(), ComponentKind::Rigidbody));

    assert!(entity.get_component::<RigidbodyComponent>().is_none());
    assert!(!entity.cache().contains(ComponentKind::Rigidbody));
}

#[test]
fn test_stale_entry_heals_after_failed_remove() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Body");
    entity.add_component::<RigidbodyComponent>().unwrap();
    headless.remove_component(entity.id(), ComponentKind::Rigidbody);

    assert!(!entity.remove_component::<RigidbodyComponent>());
    assert!(entity.cache().contains(ComponentKind::Rigidbody));
    assert!(entity.get_component::<RigidbodyComponent>().is_none());
    assert!(!entity.cache().contains(ComponentKind::Rigidbody));
}

#[test]
fn test_independent_handles_share_equality_not_cache() {
    let (_headless, ctx) = setup();
    let id = ctx.scene().create_entity("Shared").id();
    let a = ctx.entity(id);
    let b = ctx.entity(id);

    assert_eq!(a, b);
    assert!(a.cache().is_empty() && b.cache().is_empty());

    let from_a = a.get_component::<TransformComponent>().unwrap();
    assert_eq!(a.cache().len(), 1);
    assert!(b.cache().is_empty());

    let from_b = b.get_component::<TransformComponent>().unwrap();
    assert!(!Rc::ptr_eq(&from_a, &from_b));
    assert_eq!(from_a.entity_id(), from_b.entity_id());
}

#[test]
fn test_destroyed_entity_reports_invalid() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Doomed");
    entity.add_component::<MeshRendererComponent>().unwrap();
    entity.transform().unwrap();
    assert!(entity.is_valid());

    entity.destroy();
    assert!(entity.is_valid());

    let destroyed = headless.end_frame();
    assert_eq!(destroyed, vec![entity.id()]);
    entity.on_entity_destroyed();

    assert!(!entity.is_valid());
    assert!(entity.cache().is_empty());
    assert!(entity.add_component::<RigidbodyComponent>().is_none());
}

#[test]
fn test_absent_kind_never_cached_after_any_accessor() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Probe");

    for kind in ComponentKind::ALL {
        entity.add_kind(kind);
    }
    for kind in ComponentKind::ALL {
        if !kind.is_intrinsic() {
            headless.remove_component(entity.id(), kind);
        }
    }
    for kind in ComponentKind::ALL {
        entity.get_kind(kind);
        let present = headless.has_component(entity.id(), kind);
        assert_eq!(entity.cache().contains(kind), present, "{kind}");
    }
}

fn zip_ptr_eq(a: &[ComponentSlot], b: &[ComponentSlot]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.ptr_eq(y))
}

#[test]
fn test_get_is_identity_stable_while_present() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Stable");
    let mut previous: Option<Vec<ComponentSlot>> = None;

    for kind in ComponentKind::ALL {
        entity.add_kind(kind);
    }
    for _ in 0..3 {
        let slots: Vec<_> = ComponentKind::ALL
            .iter()
            .filter_map(|&kind| entity.get_kind(kind))
            .collect();
        assert_eq!(slots.len(), ComponentKind::COUNT);
        if let Some(previous) = &previous {
            assert!(zip_ptr_eq(previous, &slots));
        }
        previous = Some(slots);
    }
    assert!(headless.calls("has_component") > 0);
}

#[test]
fn test_equality_follows_identifier() {
    let (_headless, ctx) = setup();
    let a = ctx.scene().create_entity("A");
    let b = ctx.scene().create_entity("B");
    let null = ctx.entity(EntityId::INVALID);

    assert_eq!(a, a);
    assert_ne!(a, b);
    assert_ne!(null, a);
    assert_eq!(null, ctx.entity(EntityId::INVALID));
}

#[test]
fn test_validity_is_queried_every_time() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Live");
    headless.reset_calls();

    assert!(entity.is_valid());
    assert!(entity.is_valid());
    assert_eq!(headless.calls("is_entity_valid"), 2);

    headless.destroy_entity(entity.id());
    headless.end_frame();
    assert!(!entity.is_valid());
    assert_eq!(headless.calls("is_entity_valid"), 3);
}

#[test]
fn test_presence_is_queried_every_time() {
    let (headless, ctx) = setup();
    let entity: Entity = ctx.scene().create_entity("Live");
    entity.transform().unwrap();
    headless.reset_calls();

    for _ in 0..4 {
        entity.transform().unwrap();
    }
    assert_eq!(headless.calls("has_component"), 4);
}

#[test]
fn test_transform_is_not_memoised_separately() {
    let (headless, ctx) = setup();
    let entity = ctx.scene().create_entity("Node");
    let via_accessor = entity.transform().unwrap();
    let via_get = entity.get_component::<TransformComponent>().unwrap();
    assert!(Rc::ptr_eq(&via_accessor, &via_get));

    // Intrinsic components cannot be removed.
    assert!(!headless.remove_component(entity.id(), ComponentKind::Transform));
    assert!(entity.transform().is_some());
}

//! Frame loop driving the headless engine and the script host.

use std::rc::Rc;

use anyhow::{bail, Result};
use tessera_core::glam::Vec3;
use tessera_core::EntityId;
use tessera_native::HeadlessEngine;
use tessera_script::{ScriptContext, ScriptEvent, ScriptHost};
use tessera_services::settings::EntitySpec;
use tessera_services::Settings;
use tracing::{debug, info, warn};

use crate::scripts;

/// Totals reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub fixed_steps: u64,
    pub destroyed: usize,
}

pub struct Runtime {
    engine: Rc<HeadlessEngine>,
    host: ScriptHost,
}

impl Runtime {
    pub fn new(settings: &Settings) -> Self {
        let engine = Rc::new(HeadlessEngine::from_settings(settings));
        let ctx = ScriptContext::with_settings(engine.clone(), settings);
        Self {
            engine,
            host: ScriptHost::new(ctx),
        }
    }

    pub fn engine(&self) -> &Rc<HeadlessEngine> {
        &self.engine
    }

    pub fn host(&self) -> &ScriptHost {
        &self.host
    }

    /// Spawn `specs` and attach their scripts.
    pub fn populate(&mut self, specs: &[EntitySpec]) -> Result<Vec<EntityId>> {
        let mut spawned = Vec::with_capacity(specs.len());
        for spec in specs {
            let entity = self.host.context().scene().create_entity(&spec.name);
            for &kind in &spec.components {
                if entity.add_kind(kind).is_none() {
                    warn!(entity = %spec.name, %kind, "component not added");
                }
            }
            if let Some(transform) = entity.transform() {
                transform.set_position(Vec3::from_array(spec.position));
            }

            if let Some(name) = &spec.script {
                let Some(script) = scripts::create(name) else {
                    bail!(
                        "unknown script '{name}' on '{}' (expected one of {:?})",
                        spec.name,
                        scripts::SCRIPT_NAMES
                    );
                };
                self.host.attach(entity.id(), script)?;
            }
            debug!(entity = %entity.id(), name = %spec.name, "spawned");
            spawned.push(entity.id());
        }
        Ok(spawned)
    }

    /// Run up to `frames` frames of `delta` seconds, stopping early on quit.
    pub fn run(&mut self, frames: u64, delta: f32) -> RunSummary {
        let mut summary = RunSummary::default();
        self.host.broadcast(&ScriptEvent::Start);

        while summary.frames < frames {
            let steps = self.engine.begin_frame(delta);
            for _ in 0..steps {
                self.host.broadcast(&ScriptEvent::FixedUpdate);
            }
            self.host.broadcast(&ScriptEvent::Update);
            self.host.broadcast(&ScriptEvent::LateUpdate);

            // on_destroy may queue more destroys; repeat until nothing new is notified
            while self.host.entities_destroying(&self.engine.pending_destroy()) > 0 {}
            let destroyed = self.engine.end_frame();
            self.host.entities_destroyed(&destroyed);

            summary.frames += 1;
            summary.fixed_steps += u64::from(steps);
            summary.destroyed += destroyed.len();

            if self.engine.quit_requested() {
                info!(frame = summary.frames, "quit requested");
                break;
            }
        }

        self.host.broadcast(&ScriptEvent::End);
        summary
    }
}

/// Scene used when the settings file does not describe one.
pub fn demo_scene() -> Vec<EntitySpec> {
    use tessera_core::ComponentKind;

    vec![
        EntitySpec {
            name: "Sun".to_string(),
            components: vec![ComponentKind::PointLight],
            position: [0.0, 10.0, 0.0],
            script: None,
        },
        EntitySpec {
            name: "Turntable".to_string(),
            components: vec![ComponentKind::MeshRenderer],
            position: [0.0, 0.0, 5.0],
            script: Some("spinner".to_string()),
        },
        EntitySpec {
            name: "Buoy".to_string(),
            components: vec![ComponentKind::MeshRenderer, ComponentKind::Rigidbody],
            position: [3.0, 0.0, 5.0],
            script: Some("bobber".to_string()),
        },
        EntitySpec {
            name: "Spark".to_string(),
            components: vec![ComponentKind::SpriteRenderer],
            position: [-3.0, 1.0, 5.0],
            script: Some("lifetime".to_string()),
        },
    ]
}

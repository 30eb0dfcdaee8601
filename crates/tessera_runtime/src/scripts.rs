//! Demo behaviours that can be attached by name from the settings file.

use tessera_core::glam::Vec3;
use tessera_core::math::mathf;
use tessera_script::{Entity, EntityScript, ScriptContext};

/// Names accepted by `create`.
pub const SCRIPT_NAMES: [&str; 3] = ["spinner", "bobber", "lifetime"];

/// Instantiate a demo script by name.
pub fn create(name: &str) -> Option<Box<dyn EntityScript>> {
    match name {
        "spinner" => Some(Box::new(Spinner::default())),
        "bobber" => Some(Box::new(Bobber::default())),
        "lifetime" => Some(Box::new(Lifetime::default())),
        _ => None,
    }
}

/// Turns the entity about its up axis.
#[derive(Debug)]
pub struct Spinner {
    /// Degrees per second.
    pub speed: f32,
}

impl Default for Spinner {
    fn default() -> Self {
        Self { speed: 90.0 }
    }
}

impl EntityScript for Spinner {
    fn on_update(&mut self, ctx: &ScriptContext, entity: &Entity) {
        let Some(transform) = entity.transform() else {
            return;
        };
        let step = self.speed * mathf::TO_RAD * ctx.time().delta_time();
        transform.rotate(Vec3::new(0.0, step, 0.0));
    }
}

/// Floats the entity up and down along a noise curve.
#[derive(Debug, Default)]
pub struct Bobber {
    base: Vec3,
    phase: f32,
    elapsed: f32,
}

impl Bobber {
    pub const AMPLITUDE: f32 = 0.5;
}

impl EntityScript for Bobber {
    fn on_start(&mut self, ctx: &ScriptContext, entity: &Entity) {
        if let Some(transform) = entity.transform() {
            self.base = transform.position();
        }
        self.phase = ctx.random().range_f32(0.0, 100.0);
    }

    fn on_update(&mut self, ctx: &ScriptContext, entity: &Entity) {
        let Some(transform) = entity.transform() else {
            return;
        };
        self.elapsed += ctx.time().delta_time();
        let offset = ctx.noise().perlin(self.phase, self.elapsed) * Self::AMPLITUDE;
        transform.set_position(self.base + Vec3::Y * offset);
    }
}

/// Destroys the entity once its time is up.
#[derive(Debug)]
pub struct Lifetime {
    /// Seconds left.
    pub remaining: f32,
}

impl Default for Lifetime {
    fn default() -> Self {
        Self { remaining: 1.0 }
    }
}

impl EntityScript for Lifetime {
    fn on_update(&mut self, ctx: &ScriptContext, entity: &Entity) {
        if self.remaining <= 0.0 {
            return;
        }
        self.remaining -= ctx.time().delta_time();
        if self.remaining <= 0.0 {
            ctx.log().info(format_args!("{} expired", entity.name()));
            entity.destroy();
        }
    }

    fn on_destroy(&mut self, ctx: &ScriptContext, entity: &Entity) {
        match entity.transform() {
            Some(transform) => ctx
                .log()
                .debug(format_args!("{} destroyed at {}", entity.name(), transform.position())),
            None => ctx.log().debug(format_args!("{} destroyed", entity.id())),
        }
    }
}

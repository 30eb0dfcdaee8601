//! Subsystem facades
//!
//! Thin borrowed views over the engine. Each is handed out by
//! `ScriptContext` and lives no longer than it.

mod input;
mod physics;
mod scene;

use std::fmt::Display;

use tessera_core::glam::Vec3;
use tessera_core::Color;
use tessera_native::{GizmoShape, LogLevel, NativeEngine};

pub use input::Input;
pub use physics::{HitInfo, Physics};
pub use scene::{Scene, SceneManager};

pub struct Application<'a> {
    engine: &'a dyn NativeEngine,
}

impl<'a> Application<'a> {
    pub(crate) fn new(engine: &'a dyn NativeEngine) -> Self {
        Self { engine }
    }

    /// Ask the engine to exit after the current frame.
    pub fn quit(&self) {
        self.engine.quit();
    }

    pub fn vsync(&self) -> bool {
        self.engine.vsync()
    }

    pub fn set_vsync(&self, enabled: bool) {
        self.engine.set_vsync(enabled);
    }

    pub fn width(&self) -> u32 {
        self.engine.window_size().0
    }

    pub fn height(&self) -> u32 {
        self.engine.window_size().1
    }
}

pub struct Time<'a> {
    engine: &'a dyn NativeEngine,
}

impl<'a> Time<'a> {
    pub(crate) fn new(engine: &'a dyn NativeEngine) -> Self {
        Self { engine }
    }

    /// Scaled seconds since the previous frame.
    pub fn delta_time(&self) -> f32 {
        self.engine.delta_time()
    }

    pub fn time_scale(&self) -> f32 {
        self.engine.time_scale()
    }

    pub fn set_time_scale(&self, scale: f32) {
        self.engine.set_time_scale(scale);
    }
}

pub struct Noise<'a> {
    engine: &'a dyn NativeEngine,
}

impl<'a> Noise<'a> {
    pub(crate) fn new(engine: &'a dyn NativeEngine) -> Self {
        Self { engine }
    }

    pub fn set_seed(&self, seed: i32) {
        self.engine.noise_set_seed(seed);
    }

    pub fn simplex(&self, x: f32, y: f32) -> f32 {
        self.engine.noise_simplex(x, y)
    }

    pub fn perlin(&self, x: f32, y: f32) -> f32 {
        self.engine.noise_perlin(x, y)
    }
}

/// Debug shapes, drawn for the current frame only.
pub struct Gizmos<'a> {
    engine: &'a dyn NativeEngine,
}

impl<'a> Gizmos<'a> {
    pub(crate) fn new(engine: &'a dyn NativeEngine) -> Self {
        Self { engine }
    }

    pub fn draw_wire_sphere(&self, center: Vec3, radius: f32, color: Color) {
        let shape = GizmoShape::WireSphere {
            center: center.into(),
            radius,
        };
        self.engine.draw_gizmo(shape, color.into());
    }

    /// `rotation` is Euler radians.
    pub fn draw_wire_cube(&self, center: Vec3, rotation: Vec3, size: Vec3, color: Color) {
        let shape = GizmoShape::WireCube {
            center: center.into(),
            rotation: rotation.into(),
            size: size.into(),
        };
        self.engine.draw_gizmo(shape, color.into());
    }

    pub fn draw_line(&self, from: Vec3, to: Vec3, color: Color) {
        let shape = GizmoShape::Line {
            from: from.into(),
            to: to.into(),
        };
        self.engine.draw_gizmo(shape, color.into());
    }
}

/// Script logging. Messages go to the engine log and are mirrored to
/// `tracing` under the `script` target.
pub struct Log<'a> {
    engine: &'a dyn NativeEngine,
}

impl<'a> Log<'a> {
    pub(crate) fn new(engine: &'a dyn NativeEngine) -> Self {
        Self { engine }
    }

    pub fn debug(&self, message: impl Display) {
        let message = message.to_string();
        tracing::debug!(target: "script", "{message}");
        self.engine.log_message(LogLevel::Debug, &message);
    }

    pub fn info(&self, message: impl Display) {
        let message = message.to_string();
        tracing::info!(target: "script", "{message}");
        self.engine.log_message(LogLevel::Info, &message);
    }

    pub fn warn(&self, message: impl Display) {
        let message = message.to_string();
        tracing::warn!(target: "script", "{message}");
        self.engine.log_message(LogLevel::Warn, &message);
    }

    pub fn error(&self, message: impl Display) {
        let message = message.to_string();
        tracing::error!(target: "script", "{message}");
        self.engine.log_message(LogLevel::Error, &message);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use tessera_native::HeadlessEngine;
    use tessera_services::Settings;

    use crate::context::ScriptContext;

    use super::*;

    fn setup() -> (Rc<HeadlessEngine>, ScriptContext) {
        let headless = Rc::new(HeadlessEngine::new());
        let ctx = ScriptContext::with_seed(headless.clone(), 0);
        (headless, ctx)
    }

    #[test]
    fn test_log_formats_before_crossing() {
        let (headless, ctx) = setup();
        let score = 12;
        ctx.log().info(format_args!("score is {score}"));
        ctx.log().error("boom");

        assert_eq!(
            headless.logs(),
            vec![
                (LogLevel::Info, "score is 12".to_string()),
                (LogLevel::Error, "boom".to_string()),
            ]
        );
    }

    #[test]
    fn test_application() {
        let mut settings = Settings::default();
        settings.application.width = 800;
        settings.application.height = 600;
        let headless = Rc::new(HeadlessEngine::from_settings(&settings));
        let ctx = ScriptContext::with_seed(headless.clone(), 0);

        let app = ctx.application();
        assert_eq!((app.width(), app.height()), (800, 600));
        app.set_vsync(false);
        assert!(!app.vsync());
        assert!(!headless.quit_requested());
        app.quit();
        assert!(headless.quit_requested());

        headless.set_window_size(1280, 720);
        assert_eq!((app.width(), app.height()), (1280, 720));
    }

    #[test]
    fn test_time_scale() {
        let (headless, ctx) = setup();
        ctx.time().set_time_scale(0.5);
        headless.begin_frame(0.2);
        assert_eq!(ctx.time().time_scale(), 0.5);
        assert!((ctx.time().delta_time() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_gizmos_are_recorded() {
        let (headless, ctx) = setup();
        ctx.gizmos().draw_line(Vec3::ZERO, Vec3::X, Color::RED);
        ctx.gizmos().draw_wire_sphere(Vec3::Y, 2.0, Color::GREEN);

        let gizmos = headless.gizmos();
        assert_eq!(gizmos.len(), 2);
        assert_eq!(
            gizmos[0].0,
            GizmoShape::Line {
                from: Vec3::ZERO.into(),
                to: Vec3::X.into()
            }
        );
        assert_eq!(gizmos[1].1, Color::GREEN.into());

        headless.end_frame();
        assert!(headless.gizmos().is_empty());
    }

    #[test]
    fn test_noise_seed() {
        let (_headless, ctx) = setup();
        let noise = ctx.noise();
        noise.set_seed(4);
        let a = noise.perlin(1.3, 2.7);
        noise.set_seed(4);
        assert_eq!(noise.perlin(1.3, 2.7), a);
        assert!(noise.simplex(0.4, 0.9).abs() <= 1.01);
    }
}

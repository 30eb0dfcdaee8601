use tessera_core::glam::Vec2;
use tessera_native::NativeEngine;
use tessera_services::{ButtonState, CursorMode, GamepadAxis, GamepadButton, KeyCode, MouseButton};

/// Per-frame input queries.
///
/// `pressed` is true only on the first frame a button is down, `held` on
/// every frame it is down, and `released` on the frame it goes up.
pub struct Input<'a> {
    engine: &'a dyn NativeEngine,
}

impl<'a> Input<'a> {
    pub(crate) fn new(engine: &'a dyn NativeEngine) -> Self {
        Self { engine }
    }

    pub fn key_state(&self, key: KeyCode) -> ButtonState {
        self.engine.key_state(key)
    }

    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.key_state(key) == ButtonState::Pressed
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.key_state(key).is_down()
    }

    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.key_state(key) == ButtonState::Released
    }

    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.engine.mouse_button_state(button) == ButtonState::Pressed
    }

    pub fn is_mouse_button_held(&self, button: MouseButton) -> bool {
        self.engine.mouse_button_state(button).is_down()
    }

    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.engine.mouse_button_state(button) == ButtonState::Released
    }

    pub fn is_gamepad_button_pressed(&self, button: GamepadButton) -> bool {
        self.engine.gamepad_button_state(button) == ButtonState::Pressed
    }

    pub fn is_gamepad_button_held(&self, button: GamepadButton) -> bool {
        self.engine.gamepad_button_state(button).is_down()
    }

    pub fn is_gamepad_button_released(&self, button: GamepadButton) -> bool {
        self.engine.gamepad_button_state(button) == ButtonState::Released
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.engine.mouse_position().into()
    }

    /// Movement since the previous frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.engine.mouse_delta().into()
    }

    pub fn scroll_delta(&self) -> Vec2 {
        self.engine.scroll_delta().into()
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.engine.cursor_mode()
    }

    pub fn set_cursor_mode(&self, mode: CursorMode) {
        self.engine.set_cursor_mode(mode);
    }

    /// In `[-1, 1]`; triggers in `[0, 1]`.
    pub fn gamepad_axis(&self, axis: GamepadAxis) -> f32 {
        self.engine.gamepad_axis(axis)
    }
}

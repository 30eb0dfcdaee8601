//! Input codes and per-frame input state
//!
//! The engine feeds raw press/release events in and answers script queries
//! from the snapshot. `end_frame` ages transient states.

use std::collections::HashMap;
use std::hash::Hash;

use tessera_core::glam::Vec2;

/// Keyboard keys, using virtual-key values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum KeyCode {
    Back = 0x08,
    Tab = 0x09,
    Return = 0x0D,
    Shift = 0x10,
    Control = 0x11,
    Alt = 0x12,
    Escape = 0x1B,
    Space = 0x20,
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    Insert = 0x2D,
    Delete = 0x2E,
    Num0 = 0x30,
    Num1 = 0x31,
    Num2 = 0x32,
    Num3 = 0x33,
    Num4 = 0x34,
    Num5 = 0x35,
    Num6 = 0x36,
    Num7 = 0x37,
    Num8 = 0x38,
    Num9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    Numpad0 = 0x60,
    Numpad1 = 0x61,
    Numpad2 = 0x62,
    Numpad3 = 0x63,
    Numpad4 = 0x64,
    Numpad5 = 0x65,
    Numpad6 = 0x66,
    Numpad7 = 0x67,
    Numpad8 = 0x68,
    Numpad9 = 0x69,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    LeftShift = 0xA0,
    RightShift = 0xA1,
    LeftControl = 0xA2,
    RightControl = 0xA3,
    LeftAlt = 0xA4,
    RightAlt = 0xA5,
}

impl KeyCode {
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
    X1 = 3,
    X2 = 4,
}

/// Controller buttons, using the controller's button bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum GamepadButton {
    DpadUp = 0x0001,
    DpadDown = 0x0002,
    DpadLeft = 0x0004,
    DpadRight = 0x0008,
    Start = 0x0010,
    Back = 0x0020,
    LeftStick = 0x0040,
    RightStick = 0x0080,
    LeftShoulder = 0x0100,
    RightShoulder = 0x0200,
    A = 0x1000,
    B = 0x2000,
    X = 0x4000,
    Y = 0x8000,
}

impl GamepadButton {
    #[must_use]
    pub const fn bit(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorMode {
    #[default]
    Normal,
    Hidden,
    Locked,
}

/// Per-frame state of a single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Up,
    /// First frame down.
    Pressed,
    /// Down for more than one frame.
    Held,
    /// Frame the button went up.
    Released,
}

impl ButtonState {
    #[must_use]
    pub fn is_down(self) -> bool {
        matches!(self, Self::Pressed | Self::Held)
    }
}

/// Button states for one device, keyed by button code.
#[derive(Debug, Clone)]
struct Buttons<K> {
    states: HashMap<K, ButtonState>,
}

impl<K: Copy + Eq + Hash> Buttons<K> {
    fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    fn get(&self, button: K) -> ButtonState {
        self.states.get(&button).copied().unwrap_or_default()
    }

    fn press(&mut self, button: K) {
        let state = self.states.entry(button).or_default();
        if !state.is_down() {
            *state = ButtonState::Pressed;
        }
    }

    fn release(&mut self, button: K) {
        if let Some(state) = self.states.get_mut(&button) {
            if state.is_down() {
                *state = ButtonState::Released;
            }
        }
    }

    fn end_frame(&mut self) {
        self.states.retain(|_, state| match state {
            ButtonState::Pressed => {
                *state = ButtonState::Held;
                true
            }
            ButtonState::Held => true,
            ButtonState::Released | ButtonState::Up => false,
        });
    }
}

/// Input snapshot for the current frame.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: Buttons<KeyCode>,
    mouse_buttons: Buttons<MouseButton>,
    gamepad_buttons: Buttons<GamepadButton>,
    gamepad_axes: HashMap<GamepadAxis, f32>,
    mouse_position: Vec2,
    mouse_delta: Vec2,
    scroll_delta: Vec2,
    cursor_mode: CursorMode,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: Buttons::new(),
            mouse_buttons: Buttons::new(),
            gamepad_buttons: Buttons::new(),
            gamepad_axes: HashMap::new(),
            mouse_position: Vec2::ZERO,
            mouse_delta: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
            cursor_mode: CursorMode::Normal,
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        self.keys.press(key);
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys.release(key);
    }

    pub fn key_state(&self, key: KeyCode) -> ButtonState {
        self.keys.get(key)
    }

    pub fn press_mouse_button(&mut self, button: MouseButton) {
        self.mouse_buttons.press(button);
    }

    pub fn release_mouse_button(&mut self, button: MouseButton) {
        self.mouse_buttons.release(button);
    }

    pub fn mouse_button_state(&self, button: MouseButton) -> ButtonState {
        self.mouse_buttons.get(button)
    }

    pub fn press_gamepad_button(&mut self, button: GamepadButton) {
        self.gamepad_buttons.press(button);
    }

    pub fn release_gamepad_button(&mut self, button: GamepadButton) {
        self.gamepad_buttons.release(button);
    }

    pub fn gamepad_button_state(&self, button: GamepadButton) -> ButtonState {
        self.gamepad_buttons.get(button)
    }

    /// Axis values are clamped to [-1, 1].
    pub fn set_gamepad_axis(&mut self, axis: GamepadAxis, value: f32) {
        self.gamepad_axes.insert(axis, value.clamp(-1.0, 1.0));
    }

    pub fn gamepad_axis(&self, axis: GamepadAxis) -> f32 {
        self.gamepad_axes.get(&axis).copied().unwrap_or(0.0)
    }

    /// Move the cursor; the delta accumulates until `end_frame`.
    pub fn move_mouse(&mut self, position: Vec2) {
        self.mouse_delta += position - self.mouse_position;
        self.mouse_position = position;
    }

    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    pub fn scroll(&mut self, delta: Vec2) {
        self.scroll_delta += delta;
    }

    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    /// Age transient button states and clear per-frame deltas.
    pub fn end_frame(&mut self) {
        self.keys.end_frame();
        self.mouse_buttons.end_frame();
        self.gamepad_buttons.end_frame();
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

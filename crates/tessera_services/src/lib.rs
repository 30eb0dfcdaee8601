//! Tessera Services Layer
//!
//! Platform-facing services: input state and settings.

pub mod input;
pub mod settings;

pub use input::{ButtonState, CursorMode, GamepadAxis, GamepadButton, InputState, KeyCode, MouseButton};
pub use settings::{Settings, SettingsError};

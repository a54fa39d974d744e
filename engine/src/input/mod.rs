//! Input Module
//!
//! Provides platform-agnostic input handling for keyboard and mouse.
//! This module is decoupled from any specific windowing system (like winit)
//! to allow for flexible integration.
//!
//! The viewport controllers never read devices directly. They query a
//! [`SceneInput`] snapshot once per update; [`InputState`] is the snapshot
//! the host fills from window events.
//!
//! # Example
//!
//! ```rust,ignore
//! use scene_editor_core::input::{InputState, KeyCode, MouseButton, SceneInput};
//!
//! let mut input = InputState::new();
//! input.handle_key(KeyCode::W, true);
//! input.handle_mouse_button(MouseButton::Right, true);
//! assert!(input.is_key_down(KeyCode::W));
//!
//! // ... run the editor update ...
//! input.end_frame();
//! ```

pub mod cursor_manager;
pub mod keyboard;
pub mod mouse;

use glam::IVec2;

// Re-export commonly used types at module level
pub use cursor_manager::CursorManager;
pub use keyboard::{KeyCode, KeyboardState, ModifierState};
pub use mouse::{ButtonState, MouseButton, MouseMode, MouseState};

/// Read-only view of keyboard/mouse state for one editor update.
///
/// The only mutation allowed is [`SceneInput::set_mouse_mode`], which asks the
/// host to capture or release the cursor.
pub trait SceneInput {
    /// Whether `key` is held.
    fn is_key_down(&self, key: KeyCode) -> bool;
    /// Whether `key` went down this frame.
    fn is_key_pressed(&self, key: KeyCode) -> bool;
    /// Whether `button` is held.
    fn is_mouse_button_down(&self, button: MouseButton) -> bool;
    /// Whether `button` went down this frame.
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;
    /// Cursor position in window pixels.
    fn mouse_position(&self) -> IVec2;
    /// Cursor movement since the previous frame.
    fn mouse_move(&self) -> IVec2;
    /// Wheel ticks since the previous frame.
    fn wheel_move(&self) -> i32;
    /// Whether a UI element owns keyboard focus.
    ///
    /// Host-owned: the host sets it from its widget toolkit and decides what
    /// to withhold from the editor. The camera controller does not read it.
    fn is_ui_focused(&self) -> bool;
    /// Whether the cursor is over a UI element. Host-owned like
    /// [`SceneInput::is_ui_focused`].
    fn is_ui_hovered(&self) -> bool;
    /// Request absolute or wrap-around cursor mode.
    fn set_mouse_mode(&mut self, mode: MouseMode);

    /// Either Shift key held.
    fn is_shift_down(&self) -> bool {
        self.is_key_down(KeyCode::ShiftLeft) || self.is_key_down(KeyCode::ShiftRight)
    }

    /// Either Control key held.
    fn is_ctrl_down(&self) -> bool {
        self.is_key_down(KeyCode::ControlLeft) || self.is_key_down(KeyCode::ControlRight)
    }

    /// Either Alt key held.
    fn is_alt_down(&self) -> bool {
        self.is_key_down(KeyCode::AltLeft) || self.is_key_down(KeyCode::AltRight)
    }

    /// Any of left, middle or right held.
    fn is_any_mouse_button_down(&self) -> bool {
        self.is_mouse_button_down(MouseButton::Left)
            || self.is_mouse_button_down(MouseButton::Middle)
            || self.is_mouse_button_down(MouseButton::Right)
    }
}

/// Combined input state for both keyboard and mouse.
///
/// This provides a convenient way to track all input state in a single struct.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    pub cursor: CursorManager,
    /// Set by the host when a UI widget has keyboard focus. Nothing in the
    /// library clears it.
    pub ui_focused: bool,
    /// Set by the host when the cursor is over a UI widget or outside the
    /// viewports. Nothing in the library clears it.
    pub ui_hovered: bool,
}

impl InputState {
    /// Create a new input state with all inputs in their default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key press/release.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.keyboard.handle_key(key, pressed);
    }

    /// Feed a mouse button press/release.
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.mouse.set_button(button, pressed);
    }

    /// Handle window focus change. Held keys and buttons are dropped on focus loss.
    pub fn handle_focus_change(&mut self, focused: bool) {
        if !focused {
            self.keyboard.reset();
            self.mouse.buttons.reset();
        }
        self.cursor.handle_focus_change(focused);
    }

    /// Clear per-frame edges and deltas. Call after the editor update.
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
        self.mouse.end_frame();
    }

    /// Mouse mode requested since the last call, if it changed.
    ///
    /// Returning to [`MouseMode::Absolute`] forgets the cursor position, since
    /// the captured cursor may reappear anywhere.
    pub fn take_mouse_mode_change(&mut self) -> Option<MouseMode> {
        let mode = self.cursor.take_pending()?;
        if mode == MouseMode::Absolute {
            self.mouse.forget_position();
        }
        Some(mode)
    }

    /// Reset all input state to defaults.
    pub fn reset(&mut self) {
        self.keyboard.reset();
        self.mouse.reset();
    }
}

impl SceneInput for InputState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keyboard.is_down(key)
    }

    fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_pressed(key)
    }

    fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse.buttons.is_pressed(button)
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse.pressed.is_pressed(button)
    }

    fn mouse_position(&self) -> IVec2 {
        self.mouse.position
    }

    fn mouse_move(&self) -> IVec2 {
        self.mouse.movement
    }

    fn wheel_move(&self) -> i32 {
        self.mouse.wheel
    }

    fn is_ui_focused(&self) -> bool {
        self.ui_focused
    }

    fn is_ui_hovered(&self) -> bool {
        self.ui_hovered
    }

    fn set_mouse_mode(&mut self, mode: MouseMode) {
        self.cursor.set_mode(mode);
    }
}

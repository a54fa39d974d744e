//! Mouse Input Module
//!
//! Cursor position, per-frame motion and wheel accumulation, and button
//! state for the viewport camera. Host events feed it; the controller reads
//! it once per frame.

use glam::{IVec2, Vec2};

/// Mouse button identifiers, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Additional mouse buttons (button 4, 5, etc.)
    Other(u16),
}

/// How the host should treat the OS cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseMode {
    /// Cursor moves freely and reports absolute positions.
    #[default]
    Absolute,
    /// Cursor is captured and wraps, so drags never hit the screen edge.
    Wrap,
}

/// State of all mouse buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    pub left: bool,
    pub middle: bool,
    pub right: bool,
}

impl ButtonState {
    /// Create a new button state with all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update button state for a specific button.
    pub fn set(&mut self, button: MouseButton, pressed: bool) {
        match button {
            MouseButton::Left => self.left = pressed,
            MouseButton::Middle => self.middle = pressed,
            MouseButton::Right => self.right = pressed,
            MouseButton::Other(_) => {} // Ignore extra buttons
        }
    }

    /// Check if any button is pressed.
    pub fn any_pressed(&self) -> bool {
        self.left || self.middle || self.right
    }

    /// Check if a specific button is pressed.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other(_) => false,
        }
    }

    /// Reset all buttons to released state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete mouse state for one frame.
///
/// Position is in window pixels with the origin at the top-left. Movement and
/// wheel deltas accumulate until [`MouseState::end_frame`].
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Current cursor position in pixels.
    pub position: IVec2,
    /// Accumulated movement since the last frame.
    pub movement: IVec2,
    /// Accumulated wheel ticks since the last frame (positive = away from user).
    pub wheel: i32,
    /// Buttons currently held.
    pub buttons: ButtonState,
    /// Buttons whose press edge arrived this frame.
    pub pressed: ButtonState,
    /// Whether the cursor is inside the window.
    pub in_window: bool,
    has_position: bool,
    /// Sub-pixel part of raw motion not yet reported in `movement`.
    motion_remainder: Vec2,
}

impl MouseState {
    /// Create a new mouse state with no position and all buttons released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update cursor position from absolute pixel coordinates.
    ///
    /// The delta from the previous position is added to `movement`. The first
    /// position after entering the window produces no movement.
    pub fn set_position(&mut self, x: i32, y: i32) {
        let position = IVec2::new(x, y);
        if self.has_position {
            self.movement += position - self.position;
        }
        self.position = position;
        self.has_position = true;
    }

    /// Add raw relative motion (used while the cursor is captured).
    pub fn add_motion(&mut self, dx: i32, dy: i32) {
        self.movement += IVec2::new(dx, dy);
    }

    /// Add raw device motion, carrying the fractional part over to later
    /// calls so slow movement is not lost to truncation.
    pub fn add_raw_motion(&mut self, dx: f64, dy: f64) {
        let total = self.motion_remainder + Vec2::new(dx as f32, dy as f32);
        let whole = total.trunc();
        self.movement += whole.as_ivec2();
        self.motion_remainder = total - whole;
    }

    /// Drop the last known position and any pending sub-pixel motion. The
    /// next [`MouseState::set_position`] then produces no movement.
    pub fn forget_position(&mut self) {
        self.has_position = false;
        self.motion_remainder = Vec2::ZERO;
    }

    /// Handle a mouse button press/release event.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed && !self.buttons.is_pressed(button) {
            self.pressed.set(button, true);
        }
        self.buttons.set(button, pressed);
    }

    /// Accumulate wheel ticks.
    pub fn add_wheel(&mut self, ticks: i32) {
        self.wheel += ticks;
    }

    /// Handle mouse entering the window.
    pub fn enter_window(&mut self) {
        self.in_window = true;
    }

    /// Handle mouse leaving the window.
    pub fn leave_window(&mut self) {
        self.in_window = false;
        self.has_position = false;
    }

    /// Clear per-frame deltas and press edges.
    pub fn end_frame(&mut self) {
        self.movement = IVec2::ZERO;
        self.wheel = 0;
        self.pressed.reset();
    }

    /// Reset all mouse state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_state_default() {
        let buttons = ButtonState::new();
        assert!(!buttons.any_pressed());
        assert!(!buttons.is_pressed(MouseButton::Left));
    }

    #[test]
    fn test_button_state_set() {
        let mut buttons = ButtonState::new();
        buttons.set(MouseButton::Left, true);
        assert!(buttons.left);
        assert!(buttons.any_pressed());
        assert!(buttons.is_pressed(MouseButton::Left));
        assert!(!buttons.is_pressed(MouseButton::Right));
    }

    #[test]
    fn test_first_position_has_no_movement() {
        let mut mouse = MouseState::new();
        mouse.set_position(100, 50);
        assert_eq!(mouse.movement, IVec2::ZERO);

        mouse.set_position(110, 45);
        assert_eq!(mouse.movement, IVec2::new(10, -5));
        assert_eq!(mouse.position, IVec2::new(110, 45));
    }

    #[test]
    fn test_end_frame_clears_deltas() {
        let mut mouse = MouseState::new();
        mouse.add_motion(3, 4);
        mouse.add_wheel(2);
        mouse.set_button(MouseButton::Right, true);
        assert!(mouse.pressed.right);

        mouse.end_frame();
        assert_eq!(mouse.movement, IVec2::ZERO);
        assert_eq!(mouse.wheel, 0);
        assert!(!mouse.pressed.right);
        assert!(mouse.buttons.right);
    }

    #[test]
    fn test_raw_motion_keeps_sub_pixel_remainder() {
        let mut mouse = MouseState::new();
        mouse.add_raw_motion(0.75, -0.25);
        mouse.add_raw_motion(0.75, -0.25);
        assert_eq!(mouse.movement, IVec2::new(1, 0));

        // The remainder survives the frame boundary
        mouse.end_frame();
        mouse.add_raw_motion(0.75, -0.25);
        mouse.add_raw_motion(0.75, -0.25);
        assert_eq!(mouse.movement, IVec2::new(2, -1));
    }

    #[test]
    fn test_forget_position_avoids_stale_jump() {
        let mut mouse = MouseState::new();
        mouse.set_position(10, 10);
        mouse.add_raw_motion(0.5, 0.0);
        mouse.forget_position();
        mouse.set_position(600, 400);
        assert_eq!(mouse.movement, IVec2::ZERO);
        mouse.add_raw_motion(0.5, 0.0);
        assert_eq!(mouse.movement, IVec2::ZERO);
    }

    #[test]
    fn test_leave_window_resets_delta_origin() {
        let mut mouse = MouseState::new();
        mouse.set_position(10, 10);
        mouse.leave_window();
        mouse.set_position(500, 500);
        assert_eq!(mouse.movement, IVec2::ZERO);
    }
}

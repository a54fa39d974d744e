//! Cursor Manager Module
//!
//! Tracks which [`MouseMode`] the editor wants and whether the host still
//! has to apply it to the OS cursor.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scene_editor_core::input::{CursorManager, MouseMode};
//!
//! let mut cursor = CursorManager::new();
//!
//! // Camera look started: capture the cursor
//! cursor.set_mode(MouseMode::Wrap);
//!
//! // Once per frame in the host
//! if let Some(mode) = cursor.take_pending() {
//!     // grab or release the window cursor
//! }
//! ```

use super::MouseMode;

/// Manages the requested cursor mode for the editor viewports.
#[derive(Debug, Clone)]
pub struct CursorManager {
    /// Requested mouse mode
    mode: MouseMode,
    /// Whether the window currently has focus
    has_focus: bool,
    /// Tracks if state changed and needs to be applied to the window
    state_dirty: bool,
}

impl Default for CursorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CursorManager {
    /// Create a manager in absolute mode. Nothing needs applying yet.
    pub fn new() -> Self {
        Self {
            mode: MouseMode::Absolute,
            has_focus: true,
            state_dirty: false,
        }
    }

    /// Currently requested mode.
    pub fn mode(&self) -> MouseMode {
        self.mode
    }

    /// Check if the window has focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Check if cursor state needs to be applied to the window.
    pub fn is_dirty(&self) -> bool {
        self.state_dirty
    }

    /// Request a mouse mode. Repeating the current mode is free.
    pub fn set_mode(&mut self, mode: MouseMode) {
        if !self.has_focus && mode == MouseMode::Wrap {
            return;
        }
        if self.mode != mode {
            self.mode = mode;
            self.state_dirty = true;
        }
    }

    /// Handle window focus change. Losing focus always releases the cursor.
    pub fn handle_focus_change(&mut self, focused: bool) {
        self.has_focus = focused;
        if !focused {
            self.set_mode(MouseMode::Absolute);
        }
    }

    /// Return the mode to apply if it changed since the last call.
    pub fn take_pending(&mut self) -> Option<MouseMode> {
        if self.state_dirty {
            self.state_dirty = false;
            Some(self.mode)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_clean_absolute() {
        let mut cursor = CursorManager::new();
        assert_eq!(cursor.mode(), MouseMode::Absolute);
        assert!(!cursor.is_dirty());
        assert_eq!(cursor.take_pending(), None);
    }

    #[test]
    fn test_mode_change_is_reported_once() {
        let mut cursor = CursorManager::new();
        cursor.set_mode(MouseMode::Wrap);
        cursor.set_mode(MouseMode::Wrap);
        assert_eq!(cursor.take_pending(), Some(MouseMode::Wrap));
        assert_eq!(cursor.take_pending(), None);
    }

    #[test]
    fn test_focus_loss_releases_cursor() {
        let mut cursor = CursorManager::new();
        cursor.set_mode(MouseMode::Wrap);
        cursor.take_pending();

        cursor.handle_focus_change(false);
        assert_eq!(cursor.take_pending(), Some(MouseMode::Absolute));

        // Cannot capture while unfocused
        cursor.set_mode(MouseMode::Wrap);
        assert_eq!(cursor.mode(), MouseMode::Absolute);
    }
}

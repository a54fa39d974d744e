//! Keyboard Input Module
//!
//! Editor key codes plus held/pressed tracking. The host binary maps
//! platform keys onto [`KeyCode`].

use std::collections::HashSet;

/// Keys the editor binds to camera motion and shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter keys
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,

    // Navigation
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,

    // Modifiers
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    // Control keys
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Whether this is either Shift key.
    pub fn is_shift(self) -> bool {
        matches!(self, KeyCode::ShiftLeft | KeyCode::ShiftRight)
    }

    /// Whether this is either Control key.
    pub fn is_control(self) -> bool {
        matches!(self, KeyCode::ControlLeft | KeyCode::ControlRight)
    }

    /// Whether this is either Alt key.
    pub fn is_alt(self) -> bool {
        matches!(self, KeyCode::AltLeft | KeyCode::AltRight)
    }
}

/// State of keyboard modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl ModifierState {
    /// Create a new empty modifier state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no modifiers are pressed.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Keyboard state for one frame.
///
/// `down` holds every key currently held; `pressed` holds keys whose press
/// edge arrived since the last [`KeyboardState::end_frame`].
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    down: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Key-repeat events for a key that is already down do not count as a new press.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            if self.down.insert(key) {
                self.pressed.insert(key);
            }
        } else {
            self.down.remove(&key);
        }
    }

    /// Whether `key` is currently held.
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Whether `key` went down during this frame.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Current modifier state derived from held keys.
    pub fn modifiers(&self) -> ModifierState {
        ModifierState {
            shift: self.down.iter().any(|k| k.is_shift()),
            ctrl: self.down.iter().any(|k| k.is_control()),
            alt: self.down.iter().any(|k| k.is_alt()),
        }
    }

    /// Clear per-frame press edges.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Reset all keyboard state (e.g. on focus loss).
    pub fn reset(&mut self) {
        self.down.clear();
        self.pressed.clear();
    }
}

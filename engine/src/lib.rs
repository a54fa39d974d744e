//! Scene Editor Core Library
//!
//! Toolkit-independent core of a 3D scene editor: undo/redo history, the
//! viewport layout manager and the viewport camera controller, plus the
//! scene model, settings registry and editor panels they serve.
//!
//! # Modules
//!
//! - [`undo`] - Command history with grouping and capacity limits
//! - [`viewport`] - Viewport layouts, cameras and camera input handling
//! - [`input`] - Platform-agnostic keyboard and mouse snapshot
//! - [`scene`] - Scene graph, selection and undoable transforms
//! - [`config`] - Typed, persisted editor settings
//! - [`events`] - Event queues drained by the host once per frame
//! - [`editor`] - Generic UI facade, hierarchy/options panels and the document
//!
//! # Example
//!
//! ```ignore
//! use scene_editor_core::config::{Configuration, register_scene_editor_variables};
//! use scene_editor_core::editor::SceneDocument;
//! use scene_editor_core::input::{InputState, KeyCode};
//! use scene_editor_core::viewport::ViewportLayout;
//!
//! let mut config = Configuration::new();
//! register_scene_editor_variables(&mut config);
//!
//! let mut document = SceneDocument::new(1280, 720);
//! document.set_layout(ViewportLayout::Quad);
//!
//! let mut input = InputState::new();
//! input.handle_key(KeyCode::W, true);
//! document.update(&mut input, 1.0 / 60.0, &config);
//! input.end_frame();
//!
//! for event in document.take_events() {
//!     println!("{event:?}");
//! }
//! ```

pub mod config;
pub mod events;
pub mod input;
pub mod scene;
pub mod undo;
pub mod viewport;

// Editor panels and document (located in src/editor/ directory)
#[path = "../../src/editor/mod.rs"]
pub mod editor;

// Re-export commonly used types
pub use config::{CameraSettings, ConfigError, ConfigValue, Configuration, HotKeyMode};
pub use events::{EditorEvent, EventQueue};
pub use input::{InputState, KeyCode, MouseButton, MouseMode, SceneInput};
pub use scene::{NodeId, Scene, Selection, TransformSnapshot};
pub use undo::{Command, CommandGroup, UndoStack};
pub use viewport::{IntRect, ViewportLayout, ViewportManager};

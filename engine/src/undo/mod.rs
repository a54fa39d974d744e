//! Undo/Redo System
//!
//! Provides a command-based undo/redo stack that records editor operations
//! and allows stepping backwards and forwards through history.
//!
//! # Usage
//!
//! ```ignore
//! use scene_editor_core::undo::{CommandGroup, UndoStack};
//! use scene_editor_core::scene::TransformChanged;
//!
//! let mut stack = UndoStack::new();
//! stack.begin_group("Node Transforms");
//! stack.push(TransformChanged::new(node, before, after));
//! stack.end_group();
//!
//! stack.undo(&mut scene);
//! stack.redo(&mut scene);
//! ```

pub mod command;
pub mod stack;

pub use command::{Command, CommandGroup};
pub use stack::{DEFAULT_UNDO_CAPACITY, UndoStack};

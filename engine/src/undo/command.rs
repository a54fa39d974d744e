//! Reversible commands
//!
//! A [`Command`] captures enough state to reverse (undo) or re-apply (redo)
//! one editor operation. Commands address entities by id and resolve them
//! through the [`SceneGraph`] at apply time, so they stay valid while other
//! history operations remove and restore those entities. An entity that is
//! gone at apply time makes the command a no-op.

use crate::scene::SceneGraph;

/// A reversible unit of history.
pub trait Command: std::fmt::Debug {
    /// Human-readable label for history display.
    fn label(&self) -> &str;

    /// Reverse the effect. Applying twice yields the same observed state.
    fn undo(&self, scene: &mut dyn SceneGraph);

    /// Re-apply the effect. Applying twice yields the same observed state.
    fn redo(&self, scene: &mut dyn SceneGraph);
}

/// Commands executed and undone as one history entry.
///
/// `undo` walks the commands in reverse insertion order, `redo` in insertion
/// order, and both run every command to completion before returning.
#[derive(Debug, Default)]
pub struct CommandGroup {
    label: String,
    commands: Vec<Box<dyn Command>>,
}

impl CommandGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            commands: Vec::new(),
        }
    }

    /// Builder-style append.
    pub fn with(mut self, command: impl Command + 'static) -> Self {
        self.push(command);
        self
    }

    pub fn push(&mut self, command: impl Command + 'static) {
        self.commands.push(Box::new(command));
    }

    pub fn push_boxed(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }
}

impl Command for CommandGroup {
    fn label(&self) -> &str {
        &self.label
    }

    fn undo(&self, scene: &mut dyn SceneGraph) {
        for command in self.commands.iter().rev() {
            command.undo(scene);
        }
    }

    fn redo(&self, scene: &mut dyn SceneGraph) {
        for command in &self.commands {
            command.redo(scene);
        }
    }
}

//! Undo stack
//!
//! Linear history of [`Command`]s with a cursor. Pushing after an undo
//! discards the redo tail; there are no redo branches.

use log::{debug, warn};

use super::{Command, CommandGroup};
use crate::events::{EditorEvent, EventQueue};
use crate::scene::SceneGraph;

/// Default number of entries retained. Oldest entries are dropped beyond this.
pub const DEFAULT_UNDO_CAPACITY: usize = 100;

/// A bounded undo/redo history shared by one document.
///
/// Commands at `[0..cursor]` are undoable, commands at `[cursor..len]` are
/// redoable. While a group is open (see [`UndoStack::begin_group`]) pushed
/// commands collect into that group and the history is untouched until the
/// outermost [`UndoStack::end_group`].
#[derive(Debug)]
pub struct UndoStack {
    /// The command history buffer.
    commands: Vec<Box<dyn Command>>,
    /// Points to the next command index.
    cursor: usize,
    /// Maximum number of commands to retain.
    capacity: usize,
    /// Group being built, with its nesting depth.
    open_group: Option<(CommandGroup, usize)>,
    events: EventQueue<EditorEvent>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    /// Create a new empty undo stack with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_UNDO_CAPACITY)
    }

    /// Create a stack retaining at most `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
            open_group: None,
            events: EventQueue::new(),
        }
    }

    /// Push a new command onto the stack.
    ///
    /// - Inside an open group the command joins the group instead.
    /// - Any redo history (commands after the cursor) is discarded.
    /// - If the stack exceeds its capacity, the oldest commands are dropped.
    pub fn push(&mut self, command: impl Command + 'static) {
        self.push_boxed(Box::new(command));
    }

    /// Boxed variant of [`UndoStack::push`].
    pub fn push_boxed(&mut self, command: Box<dyn Command>) {
        if let Some((group, _)) = self.open_group.as_mut() {
            group.push_boxed(command);
            return;
        }

        self.commands.truncate(self.cursor);
        debug!("undo: push '{}'", command.label());
        self.commands.push(command);
        self.enforce_capacity();
        self.cursor = self.commands.len();
        self.events.push(EditorEvent::HistoryChanged);
    }

    /// Open a command group. Nested calls only deepen the current group.
    pub fn begin_group(&mut self, label: impl Into<String>) {
        match self.open_group.as_mut() {
            Some((_, depth)) => *depth += 1,
            None => {
                let group = CommandGroup::new(label);
                debug!("undo: begin group '{}'", group.label());
                self.open_group = Some((group, 1));
            }
        }
    }

    /// Close a command group. The outermost close pushes the group as one
    /// history entry; an empty group is discarded.
    pub fn end_group(&mut self) {
        let Some((_, depth)) = self.open_group.as_mut() else {
            warn!("undo: end_group without matching begin_group");
            return;
        };
        *depth -= 1;
        if *depth > 0 {
            return;
        }

        if let Some((group, _)) = self.open_group.take() {
            if group.is_empty() {
                debug!("undo: discard empty group '{}'", group.label());
            } else {
                self.push(group);
            }
        }
    }

    /// Whether a group is currently open.
    pub fn is_grouping(&self) -> bool {
        self.open_group.is_some()
    }

    /// Undo the most recent command. Returns `false` if there was nothing to undo.
    pub fn undo(&mut self, scene: &mut dyn SceneGraph) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let command = &self.commands[self.cursor];
        debug!("undo: undo '{}'", command.label());
        command.undo(scene);
        self.events.push(EditorEvent::HistoryChanged);
        true
    }

    /// Redo the next command. Returns `false` if there was nothing to redo.
    pub fn redo(&mut self, scene: &mut dyn SceneGraph) -> bool {
        if self.cursor >= self.commands.len() {
            return false;
        }
        let command = &self.commands[self.cursor];
        debug!("undo: redo '{}'", command.label());
        command.redo(scene);
        self.cursor += 1;
        self.events.push(EditorEvent::HistoryChanged);
        true
    }

    /// Returns `true` if there is at least one command that can be undone.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` if there is at least one command that can be redone.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Number of undoable commands.
    pub fn undo_count(&self) -> usize {
        self.cursor
    }

    /// Number of redoable commands.
    pub fn redo_count(&self) -> usize {
        self.commands.len() - self.cursor
    }

    /// Label of the entry the next undo would reverse.
    pub fn undo_label(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.commands.get(i))
            .map(|c| c.label())
    }

    /// Label of the entry the next redo would re-apply.
    pub fn redo_label(&self) -> Option<&str> {
        self.commands.get(self.cursor).map(|c| c.label())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, dropping the oldest entries if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        let before = self.commands.len();
        self.enforce_capacity();
        if self.commands.len() != before {
            self.events.push(EditorEvent::HistoryChanged);
        }
    }

    /// Clear all undo/redo history, including any open group.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.cursor = 0;
        self.open_group = None;
        self.events.push(EditorEvent::HistoryChanged);
    }

    /// Take queued history notifications.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain()
    }

    fn enforce_capacity(&mut self) {
        if self.commands.len() > self.capacity {
            let excess = self.commands.len() - self.capacity;
            self.commands.drain(0..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeId, TransformSnapshot};

    /// Command that only carries a label.
    #[derive(Debug)]
    struct Marker(String);

    impl Command for Marker {
        fn label(&self) -> &str {
            &self.0
        }
        fn undo(&self, _scene: &mut dyn SceneGraph) {}
        fn redo(&self, _scene: &mut dyn SceneGraph) {}
    }

    fn marker(i: usize) -> Marker {
        Marker(format!("cmd {i}"))
    }

    struct NoScene;

    impl SceneGraph for NoScene {
        fn contains(&self, _node: NodeId) -> bool {
            false
        }
        fn node_transform(&self, _node: NodeId) -> Option<TransformSnapshot> {
            None
        }
        fn set_node_transform(&mut self, _node: NodeId, _t: &TransformSnapshot) -> bool {
            false
        }
    }

    #[test]
    fn test_new_stack_is_empty() {
        let stack = UndoStack::new();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_count(), 0);
        assert_eq!(stack.redo_count(), 0);
        assert_eq!(stack.undo_label(), None);
    }

    #[test]
    fn test_push_and_undo() {
        let mut stack = UndoStack::new();
        let mut scene = NoScene;
        stack.push(marker(0));

        assert!(stack.can_undo());
        assert!(!stack.can_redo());

        assert!(stack.undo(&mut scene));
        assert!(!stack.can_undo());
        assert!(stack.can_redo());
        assert_eq!(stack.redo_label(), Some("cmd 0"));
    }

    #[test]
    fn test_undo_and_redo_at_ends_are_noops() {
        let mut stack = UndoStack::new();
        let mut scene = NoScene;
        stack.push(marker(0));
        stack.push(marker(1));

        assert!(stack.undo(&mut scene));
        assert!(stack.undo(&mut scene));
        assert!(!stack.undo(&mut scene));

        assert!(stack.redo(&mut scene));
        assert!(stack.redo(&mut scene));
        assert!(!stack.redo(&mut scene));
    }

    #[test]
    fn test_push_truncates_redo_history() {
        let mut stack = UndoStack::new();
        let mut scene = NoScene;
        stack.push(marker(0));
        stack.push(marker(1));
        stack.push(marker(2));

        stack.undo(&mut scene);
        stack.undo(&mut scene);
        assert_eq!(stack.redo_count(), 2);

        stack.push(marker(99));
        assert!(!stack.can_redo());
        assert_eq!(stack.undo_count(), 2);
        assert_eq!(stack.undo_label(), Some("cmd 99"));
    }

    #[test]
    fn test_capacity_enforcement() {
        let mut stack = UndoStack::with_capacity(10);
        let mut scene = NoScene;
        for i in 0..15 {
            stack.push(marker(i));
        }
        assert_eq!(stack.undo_count(), 10);
        assert_eq!(stack.redo_count(), 0);

        for _ in 0..10 {
            assert!(stack.undo(&mut scene));
        }
        assert!(!stack.undo(&mut scene));
        // Oldest five were evicted
        assert_eq!(stack.redo_label(), Some("cmd 5"));
    }

    #[test]
    fn test_shrinking_capacity_keeps_cursor_valid() {
        let mut stack = UndoStack::new();
        let mut scene = NoScene;
        for i in 0..6 {
            stack.push(marker(i));
        }
        stack.undo(&mut scene);
        stack.undo(&mut scene);

        stack.set_capacity(3);
        assert_eq!(stack.undo_count() + stack.redo_count(), 3);
        assert_eq!(stack.undo_count(), 1);
        assert_eq!(stack.redo_label(), Some("cmd 4"));
    }

    #[test]
    fn test_group_collapses_into_one_entry() {
        let mut stack = UndoStack::new();
        stack.begin_group("drag");
        stack.push(marker(0));
        stack.push(marker(1));
        assert!(stack.is_grouping());
        assert_eq!(stack.undo_count(), 0);

        stack.end_group();
        assert!(!stack.is_grouping());
        assert_eq!(stack.undo_count(), 1);
        assert_eq!(stack.undo_label(), Some("drag"));
    }

    #[test]
    fn test_nested_groups_push_once() {
        let mut stack = UndoStack::new();
        stack.begin_group("outer");
        stack.push(marker(0));
        stack.begin_group("inner");
        stack.push(marker(1));
        stack.end_group();
        assert_eq!(stack.undo_count(), 0);
        stack.end_group();
        assert_eq!(stack.undo_count(), 1);
        assert_eq!(stack.undo_label(), Some("outer"));
    }

    #[test]
    fn test_empty_group_is_discarded() {
        let mut stack = UndoStack::new();
        stack.begin_group("nothing");
        stack.end_group();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_unbalanced_end_group_is_ignored() {
        let mut stack = UndoStack::new();
        stack.end_group();
        stack.push(marker(0));
        assert_eq!(stack.undo_count(), 1);
    }

    #[test]
    fn test_history_events() {
        let mut stack = UndoStack::new();
        let mut scene = NoScene;
        stack.push(marker(0));
        stack.undo(&mut scene);
        stack.undo(&mut scene); // no-op, no event
        stack.redo(&mut scene);
        assert_eq!(stack.take_events().len(), 3);
        assert!(stack.take_events().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut stack = UndoStack::new();
        stack.push(marker(0));
        stack.push(marker(1));
        stack.clear();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }
}

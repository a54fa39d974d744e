//! Editor Events
//!
//! Producers (scene, undo history, viewport manager) push events into an
//! [`EventQueue`]; the host drains it once per frame. There is no global
//! dispatcher.

use crate::scene::SceneEvent;
use crate::viewport::ViewportLayout;

/// Notifications the editor core announces to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Undo/redo availability may have changed.
    HistoryChanged,
    /// The viewport collection was resized or retiled.
    ViewportsChanged {
        layout: ViewportLayout,
        count: usize,
    },
    /// A different viewport now receives camera input.
    ActiveViewportChanged { index: usize },
    /// The selected node set changed.
    SelectionChanged,
    /// Forwarded scene-graph change.
    Scene(SceneEvent),
}

/// FIFO of pending events.
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    pending: Vec<E>,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Queue an event.
    pub fn push(&mut self, event: E) {
        self.pending.push(event);
    }

    /// Take all pending events in the order they were pushed.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Look at pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(EditorEvent::HistoryChanged);
        queue.push(EditorEvent::SelectionChanged);
        assert_eq!(queue.len(), 2);

        let events = queue.drain();
        assert_eq!(events, vec![EditorEvent::HistoryChanged, EditorEvent::SelectionChanged]);
        assert!(queue.is_empty());
    }
}

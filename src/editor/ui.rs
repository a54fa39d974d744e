//! Generic UI facade
//!
//! Capability traits the editor panels are written against. A widget
//! toolkit plugs in by implementing them; [`super::headless`] is the
//! in-memory implementation used by the host binary and the tests.
//!
//! Widgets are addressed by small copyable ids rather than references, and
//! user interaction is polled (`take_*`) instead of delivered via callbacks.

use std::collections::HashMap;

use crate::input::{KeyCode, ModifierState};

// ============================================================================
// ACTIONS
// ============================================================================

/// Where a dialog should appear when first shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogLocationHint {
    #[default]
    Undocked,
    DockLeft,
    DockRight,
    DockTop,
    DockBottom,
}

/// A key chord that triggers an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    pub const fn key(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }

    pub const fn ctrl(key: KeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::key(key)
        }
    }

    pub const fn ctrl_shift(key: KeyCode) -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::key(key)
        }
    }

    /// Whether pressing `key` with `modifiers` held fires this binding.
    /// Modifiers must match exactly.
    pub fn matches(&self, key: KeyCode, modifiers: ModifierState) -> bool {
        self.key == key
            && self.ctrl == modifiers.ctrl
            && self.shift == modifiers.shift
            && self.alt == modifiers.alt
    }
}

/// A named, triggerable command exposed through menus and shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractAction {
    /// Stable identifier, e.g. `"Edit.Undo"`.
    pub id: String,
    pub text: String,
    pub key_binding: Option<KeyBinding>,
}

impl AbstractAction {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            key_binding: None,
        }
    }

    pub fn with_key(mut self, binding: KeyBinding) -> Self {
        self.key_binding = Some(binding);
        self
    }
}

// ============================================================================
// HIERARCHY ITEMS
// ============================================================================

/// Handle of a row in a hierarchy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

/// One row of a hierarchy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyItem {
    pub text: String,
    pub parent: Option<ItemId>,
    pub children: Vec<ItemId>,
}

/// Tree of [`HierarchyItem`]s with stable ids. Top-level items have no parent.
#[derive(Debug, Clone, Default)]
pub struct HierarchyTree {
    items: HashMap<ItemId, HierarchyItem>,
    roots: Vec<ItemId>,
    next_id: u32,
}

impl HierarchyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&HierarchyItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Top-level items in display order.
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    /// Children of `parent`, or the top-level items for `None`.
    pub fn children(&self, parent: Option<ItemId>) -> &[ItemId] {
        match parent {
            None => &self.roots,
            Some(id) => self.items.get(&id).map_or(&[], |i| i.children.as_slice()),
        }
    }

    /// Position of `id` among its siblings.
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        let parent = self.items.get(&id)?.parent;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Insert a row under `parent` at `index` (clamped; `None` appends).
    /// Returns `None` when `parent` does not exist.
    pub fn insert(&mut self, parent: Option<ItemId>, index: Option<usize>, text: &str) -> Option<ItemId> {
        if let Some(p) = parent {
            if !self.items.contains_key(&p) {
                return None;
            }
        }
        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.items.insert(
            id,
            HierarchyItem {
                text: text.to_string(),
                parent,
                children: Vec::new(),
            },
        );
        let siblings = match parent {
            None => &mut self.roots,
            Some(p) => &mut self.items.get_mut(&p)?.children,
        };
        let at = index.unwrap_or(siblings.len()).min(siblings.len());
        siblings.insert(at, id);
        Some(id)
    }

    /// Remove a row and all rows beneath it. Returns the removed ids.
    pub fn remove(&mut self, id: ItemId) -> Vec<ItemId> {
        let Some(item) = self.items.get(&id) else {
            return Vec::new();
        };
        let parent = item.parent;
        match parent {
            None => self.roots.retain(|&c| c != id),
            Some(p) => {
                if let Some(p) = self.items.get_mut(&p) {
                    p.children.retain(|&c| c != id);
                }
            }
        }

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(item) = self.items.remove(&current) {
                stack.extend(item.children);
                removed.push(current);
            }
        }
        removed
    }

    pub fn set_text(&mut self, id: ItemId, text: &str) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.roots.clear();
    }

    /// Depth-first walk yielding `(depth, id)` in display order.
    pub fn walk(&self) -> Vec<(usize, ItemId)> {
        let mut out = Vec::with_capacity(self.items.len());
        let mut stack: Vec<(usize, ItemId)> = self.roots.iter().rev().map(|&r| (0, r)).collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            if let Some(item) = self.items.get(&id) {
                stack.extend(item.children.iter().rev().map(|&c| (depth + 1, c)));
            }
        }
        out
    }
}

// ============================================================================
// CAPABILITY TRAITS
// ============================================================================

/// A tree view with selectable rows.
pub trait GenericHierarchyList {
    /// Insert a row; `None` parent means top level, `None` index appends.
    fn add_item(&mut self, parent: Option<ItemId>, index: Option<usize>, text: &str) -> Option<ItemId>;
    /// Remove a row and its subtree.
    fn remove_item(&mut self, item: ItemId) -> bool;
    fn set_item_text(&mut self, item: ItemId, text: &str) -> bool;
    fn item_text(&self, item: ItemId) -> Option<&str>;
    fn item_children(&self, item: ItemId) -> Vec<ItemId>;
    fn select_item(&mut self, item: ItemId);
    fn deselect_item(&mut self, item: ItemId);
    /// Selected rows in selection order.
    fn selection(&self) -> Vec<ItemId>;
    fn clear(&mut self);
    /// Whether the selection changed since the last call.
    fn take_selection_changed(&mut self) -> bool;
}

/// A dockable panel.
pub trait GenericDialog {
    fn set_name(&mut self, name: &str);
    fn name(&self) -> &str;
    fn location_hint(&self) -> DialogLocationHint;
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
}

/// A menu holding actions and submenus.
pub trait GenericMenu {
    /// Add (or find) a submenu by text.
    fn add_menu(&mut self, text: &str) -> &mut dyn GenericMenu;
    /// Add an action entry by action id.
    fn add_action(&mut self, action_id: &str);
    fn text(&self) -> &str;
}

/// Application main window: owns dialogs, actions and the menu bar.
pub trait GenericMainWindow {
    type Dialog: GenericDialog;

    /// Create a dialog and return its index.
    fn add_dialog(&mut self, name: &str, hint: DialogLocationHint) -> usize;
    fn dialog_mut(&mut self, index: usize) -> Option<&mut Self::Dialog>;
    /// Register an action. An action with the same id is replaced.
    fn add_action(&mut self, action: AbstractAction);
    fn action(&self, id: &str) -> Option<&AbstractAction>;
    /// Top-level menu by text, created on first use.
    fn add_menu(&mut self, text: &str) -> &mut dyn GenericMenu;
    /// Fire an action as if the user picked it. `false` for unknown ids.
    fn trigger_action(&mut self, id: &str) -> bool;
    /// Action ids fired since the last call, in firing order.
    fn take_triggered_actions(&mut self) -> Vec<String>;

    /// Action bound to `key` with exactly `modifiers` held.
    fn find_action_by_key(&self, key: KeyCode, modifiers: ModifierState) -> Option<&AbstractAction>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_binding_exact_modifiers() {
        let undo = KeyBinding::ctrl(KeyCode::Z);
        let ctrl = ModifierState {
            ctrl: true,
            ..Default::default()
        };
        let ctrl_shift = ModifierState {
            ctrl: true,
            shift: true,
            alt: false,
        };
        assert!(undo.matches(KeyCode::Z, ctrl));
        assert!(!undo.matches(KeyCode::Z, ctrl_shift));
        assert!(!undo.matches(KeyCode::Y, ctrl));
    }

    #[test]
    fn test_tree_insert_and_index() {
        let mut tree = HierarchyTree::new();
        let root = tree.insert(None, None, "root").unwrap();
        let b = tree.insert(Some(root), None, "b").unwrap();
        let a = tree.insert(Some(root), Some(0), "a").unwrap();
        assert_eq!(tree.children(Some(root)), &[a, b]);
        assert_eq!(tree.index_of(b), Some(1));
        assert_eq!(tree.insert(Some(ItemId(999)), None, "x"), None);
    }

    #[test]
    fn test_tree_remove_subtree() {
        let mut tree = HierarchyTree::new();
        let root = tree.insert(None, None, "root").unwrap();
        let child = tree.insert(Some(root), None, "child").unwrap();
        let grandchild = tree.insert(Some(child), None, "grandchild").unwrap();

        let mut removed = tree.remove(child);
        removed.sort();
        assert_eq!(removed, vec![child, grandchild]);
        assert_eq!(tree.len(), 1);
        assert!(tree.children(Some(root)).is_empty());
    }

    #[test]
    fn test_tree_walk_order() {
        let mut tree = HierarchyTree::new();
        let root = tree.insert(None, None, "root").unwrap();
        let a = tree.insert(Some(root), None, "a").unwrap();
        let a1 = tree.insert(Some(a), None, "a1").unwrap();
        let b = tree.insert(Some(root), None, "b").unwrap();
        assert_eq!(tree.walk(), vec![(0, root), (1, a), (2, a1), (1, b)]);
    }
}

//! Headless UI backend
//!
//! In-memory widgets implementing the generic UI traits. Nothing is drawn;
//! the state can be inspected and user interaction simulated
//! ([`HeadlessHierarchyList::click_item`], [`HeadlessMainWindow::press_key`]).

use log::debug;

use super::ui::{
    AbstractAction, DialogLocationHint, GenericDialog, GenericHierarchyList, GenericMainWindow,
    GenericMenu, HierarchyTree, ItemId,
};
use crate::input::{KeyCode, ModifierState};

// ============================================================================
// HIERARCHY LIST
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct HeadlessHierarchyList {
    tree: HierarchyTree,
    selected: Vec<ItemId>,
    selection_changed: bool,
}

impl HeadlessHierarchyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &HierarchyTree {
        &self.tree
    }

    /// Simulate a user click: the clicked row becomes the only selection.
    pub fn click_item(&mut self, item: ItemId) {
        if !self.tree.contains(item) {
            return;
        }
        if self.selected != [item] {
            self.selected = vec![item];
            self.selection_changed = true;
        }
    }

    /// Rows in display order, indented two spaces per level.
    pub fn visible_rows(&self) -> Vec<String> {
        self.tree
            .walk()
            .into_iter()
            .filter_map(|(depth, id)| {
                let item = self.tree.get(id)?;
                Some(format!("{}{}", "  ".repeat(depth), item.text))
            })
            .collect()
    }

    /// Row whose text equals `text`, searching depth-first.
    pub fn find_item(&self, text: &str) -> Option<ItemId> {
        self.tree
            .walk()
            .into_iter()
            .map(|(_, id)| id)
            .find(|&id| self.tree.get(id).is_some_and(|i| i.text == text))
    }
}

impl GenericHierarchyList for HeadlessHierarchyList {
    fn add_item(&mut self, parent: Option<ItemId>, index: Option<usize>, text: &str) -> Option<ItemId> {
        self.tree.insert(parent, index, text)
    }

    fn remove_item(&mut self, item: ItemId) -> bool {
        let removed = self.tree.remove(item);
        if removed.is_empty() {
            return false;
        }
        let before = self.selected.len();
        self.selected.retain(|s| !removed.contains(s));
        if self.selected.len() != before {
            self.selection_changed = true;
        }
        true
    }

    fn set_item_text(&mut self, item: ItemId, text: &str) -> bool {
        self.tree.set_text(item, text)
    }

    fn item_text(&self, item: ItemId) -> Option<&str> {
        self.tree.get(item).map(|i| i.text.as_str())
    }

    fn item_children(&self, item: ItemId) -> Vec<ItemId> {
        self.tree.children(Some(item)).to_vec()
    }

    fn select_item(&mut self, item: ItemId) {
        if self.tree.contains(item) && !self.selected.contains(&item) {
            self.selected.push(item);
            self.selection_changed = true;
        }
    }

    fn deselect_item(&mut self, item: ItemId) {
        if let Some(i) = self.selected.iter().position(|&s| s == item) {
            self.selected.remove(i);
            self.selection_changed = true;
        }
    }

    fn selection(&self) -> Vec<ItemId> {
        self.selected.clone()
    }

    fn clear(&mut self) {
        self.tree.clear();
        if !self.selected.is_empty() {
            self.selected.clear();
            self.selection_changed = true;
        }
    }

    fn take_selection_changed(&mut self) -> bool {
        std::mem::take(&mut self.selection_changed)
    }
}

// ============================================================================
// DIALOG / MENU
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessDialog {
    name: String,
    hint: DialogLocationHint,
    visible: bool,
}

impl GenericDialog for HeadlessDialog {
    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location_hint(&self) -> DialogLocationHint {
        self.hint
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessMenu {
    text: String,
    pub actions: Vec<String>,
    pub submenus: Vec<HeadlessMenu>,
}

impl HeadlessMenu {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Default::default()
        }
    }

    pub fn submenu(&self, text: &str) -> Option<&HeadlessMenu> {
        self.submenus.iter().find(|m| m.text == text)
    }

    fn submenu_entry(&mut self, text: &str) -> &mut HeadlessMenu {
        let index = match self.submenus.iter().position(|m| m.text == text) {
            Some(i) => i,
            None => {
                self.submenus.push(HeadlessMenu::new(text));
                self.submenus.len() - 1
            }
        };
        &mut self.submenus[index]
    }
}

impl GenericMenu for HeadlessMenu {
    fn add_menu(&mut self, text: &str) -> &mut dyn GenericMenu {
        self.submenu_entry(text)
    }

    fn add_action(&mut self, action_id: &str) {
        self.actions.push(action_id.to_string());
    }

    fn text(&self) -> &str {
        &self.text
    }
}

// ============================================================================
// MAIN WINDOW
// ============================================================================

#[derive(Debug, Default)]
pub struct HeadlessMainWindow {
    dialogs: Vec<HeadlessDialog>,
    actions: Vec<AbstractAction>,
    menu_bar: HeadlessMenu,
    triggered: Vec<String>,
}

impl HeadlessMainWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialogs(&self) -> &[HeadlessDialog] {
        &self.dialogs
    }

    pub fn actions(&self) -> &[AbstractAction] {
        &self.actions
    }

    pub fn menu_bar(&self) -> &HeadlessMenu {
        &self.menu_bar
    }

    /// Feed a key press; fires the bound action if any.
    pub fn press_key(&mut self, key: KeyCode, modifiers: ModifierState) -> Option<String> {
        let id = self.find_action_by_key(key, modifiers)?.id.clone();
        self.trigger_action(&id);
        Some(id)
    }
}

impl GenericMainWindow for HeadlessMainWindow {
    type Dialog = HeadlessDialog;

    fn add_dialog(&mut self, name: &str, hint: DialogLocationHint) -> usize {
        self.dialogs.push(HeadlessDialog {
            name: name.to_string(),
            hint,
            visible: true,
        });
        self.dialogs.len() - 1
    }

    fn dialog_mut(&mut self, index: usize) -> Option<&mut HeadlessDialog> {
        self.dialogs.get_mut(index)
    }

    fn add_action(&mut self, action: AbstractAction) {
        match self.actions.iter_mut().find(|a| a.id == action.id) {
            Some(existing) => *existing = action,
            None => self.actions.push(action),
        }
    }

    fn action(&self, id: &str) -> Option<&AbstractAction> {
        self.actions.iter().find(|a| a.id == id)
    }

    fn add_menu(&mut self, text: &str) -> &mut dyn GenericMenu {
        self.menu_bar.submenu_entry(text)
    }

    fn trigger_action(&mut self, id: &str) -> bool {
        if self.action(id).is_none() {
            return false;
        }
        debug!("ui: action '{id}'");
        self.triggered.push(id.to_string());
        true
    }

    fn take_triggered_actions(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggered)
    }

    fn find_action_by_key(&self, key: KeyCode, modifiers: ModifierState) -> Option<&AbstractAction> {
        self.actions
            .iter()
            .find(|a| a.key_binding.is_some_and(|b| b.matches(key, modifiers)))
    }
}

//! Hierarchy window
//!
//! Mirrors the scene tree into a [`GenericHierarchyList`]. Each node becomes
//! a row; its components are listed first under it, followed by its child
//! nodes. Scene events update the rows incrementally, and row selection is
//! synchronized with the document [`Selection`] in both directions.

use std::collections::HashMap;

use log::{debug, warn};

use super::ui::{GenericHierarchyList, ItemId};
use crate::scene::{ComponentId, NodeId, Scene, SceneEvent, SceneNode, Selection};

/// What a row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Node(NodeId),
    Component(ComponentId),
}

/// Row text for a node: its name, or `Node <id>` when unnamed.
pub fn node_item_text(node: &SceneNode) -> String {
    let mut text = if node.name.is_empty() {
        format!("Node {}", node.id.0)
    } else {
        node.name.clone()
    };
    if !node.enabled {
        text.push_str(" (disabled)");
    }
    text
}

pub struct HierarchyWindow<L: GenericHierarchyList> {
    list: L,
    node_items: HashMap<NodeId, ItemId>,
    component_items: HashMap<ComponentId, ItemId>,
    rows: HashMap<ItemId, RowKind>,
}

impl<L: GenericHierarchyList> HierarchyWindow<L> {
    pub fn new(list: L) -> Self {
        Self {
            list,
            node_items: HashMap::new(),
            component_items: HashMap::new(),
            rows: HashMap::new(),
        }
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    pub fn item_for_node(&self, node: NodeId) -> Option<ItemId> {
        self.node_items.get(&node).copied()
    }

    pub fn item_for_component(&self, component: ComponentId) -> Option<ItemId> {
        self.component_items.get(&component).copied()
    }

    /// Rebuild every row from the scene root.
    pub fn set_scene(&mut self, scene: &Scene) {
        self.list.clear();
        self.node_items.clear();
        self.component_items.clear();
        self.rows.clear();
        self.add_node_rows(scene, scene.root(), None, None);
        // Rebuilding is not a user selection change
        self.list.take_selection_changed();
        debug!("hierarchy: rebuilt {} rows", self.rows.len());
    }

    /// Apply one scene change to the rows.
    pub fn handle_scene_event(&mut self, scene: &Scene, event: &SceneEvent) {
        match *event {
            SceneEvent::NodeAdded { node, parent } => {
                if self.node_items.contains_key(&node) {
                    return;
                }
                let Some(parent_item) = self.item_for_node(parent) else {
                    warn!("hierarchy: parent {parent:?} of added node {node:?} has no row");
                    return;
                };
                // Components come first, then child nodes in scene order
                let index = scene.node(parent).map(|p| {
                    let child = p.children.iter().position(|&c| c == node);
                    p.components.len() + child.unwrap_or(p.children.len())
                });
                self.add_node_rows(scene, node, Some(parent_item), index);
            }
            SceneEvent::NodeRemoved { node, .. } => {
                if let Some(item) = self.item_for_node(node) {
                    self.remove_rows(item);
                }
            }
            SceneEvent::NodeNameChanged { node } | SceneEvent::NodeEnabledChanged { node } => {
                if let (Some(item), Some(data)) = (self.item_for_node(node), scene.node(node)) {
                    self.list.set_item_text(item, &node_item_text(data));
                }
            }
            SceneEvent::ComponentAdded { node, component } => {
                if self.component_items.contains_key(&component) {
                    return;
                }
                let (Some(node_item), Some(data)) = (self.item_for_node(node), scene.node(node)) else {
                    return;
                };
                let Some(index) = data.components.iter().position(|c| c.id == component) else {
                    return;
                };
                let text = &data.components[index].type_name;
                if let Some(item) = self.list.add_item(Some(node_item), Some(index), text) {
                    self.component_items.insert(component, item);
                    self.rows.insert(item, RowKind::Component(component));
                }
            }
            SceneEvent::ComponentRemoved { component, .. } => {
                if let Some(item) = self.item_for_component(component) {
                    self.remove_rows(item);
                }
            }
            SceneEvent::NodeTransformChanged { .. } => {}
        }
    }

    /// Select the rows of `selection`, replacing the list selection. The
    /// change flag is consumed so the next poll does not echo it back.
    pub fn set_selection(&mut self, selection: &Selection) {
        for item in self.list.selection() {
            self.list.deselect_item(item);
        }
        for node in selection.nodes() {
            if let Some(item) = self.item_for_node(*node) {
                self.list.select_item(item);
            }
        }
        self.list.take_selection_changed();
    }

    /// Nodes whose rows are selected. Component rows are skipped.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.list
            .selection()
            .into_iter()
            .filter_map(|item| match self.rows.get(&item) {
                Some(RowKind::Node(node)) => Some(*node),
                _ => None,
            })
            .collect()
    }

    /// Selected nodes if the user changed the list selection since last poll.
    pub fn poll_selection(&mut self) -> Option<Vec<NodeId>> {
        if !self.list.take_selection_changed() {
            return None;
        }
        Some(self.selected_nodes())
    }

    fn add_node_rows(
        &mut self,
        scene: &Scene,
        node: NodeId,
        parent_item: Option<ItemId>,
        index: Option<usize>,
    ) {
        let Some(data) = scene.node(node) else {
            return;
        };
        let Some(item) = self.list.add_item(parent_item, index, &node_item_text(data)) else {
            return;
        };
        self.node_items.insert(node, item);
        self.rows.insert(item, RowKind::Node(node));

        for component in &data.components {
            if let Some(row) = self.list.add_item(Some(item), None, &component.type_name) {
                self.component_items.insert(component.id, row);
                self.rows.insert(row, RowKind::Component(component.id));
            }
        }
        for &child in &data.children {
            self.add_node_rows(scene, child, Some(item), None);
        }
    }

    fn remove_rows(&mut self, item: ItemId) {
        let mut stack = vec![item];
        while let Some(current) = stack.pop() {
            stack.extend(self.list.item_children(current));
            match self.rows.remove(&current) {
                Some(RowKind::Node(node)) => {
                    self.node_items.remove(&node);
                }
                Some(RowKind::Component(component)) => {
                    self.component_items.remove(&component);
                }
                None => {}
            }
        }
        self.list.remove_item(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::headless::HeadlessHierarchyList;

    fn window_for(scene: &Scene) -> HierarchyWindow<HeadlessHierarchyList> {
        let mut window = HierarchyWindow::new(HeadlessHierarchyList::new());
        window.set_scene(scene);
        window
    }

    fn sync(window: &mut HierarchyWindow<HeadlessHierarchyList>, scene: &mut Scene) {
        for event in scene.take_events() {
            window.handle_scene_event(scene, &event);
        }
    }

    #[test]
    fn test_rows_mirror_scene() {
        let mut scene = Scene::new();
        let a = scene.create_node(scene.root(), "Box").unwrap();
        scene.add_component(a, "StaticModel");
        scene.create_node(a, "").unwrap();
        scene.take_events();

        let window = window_for(&scene);
        assert_eq!(
            window.list().visible_rows(),
            vec!["Scene", "  Box", "    StaticModel", "    Node 3"]
        );
    }

    #[test]
    fn test_incremental_updates() {
        let mut scene = Scene::new();
        let mut window = window_for(&scene);

        let a = scene.create_node(scene.root(), "A").unwrap();
        let b = scene.create_node(scene.root(), "B").unwrap();
        let light = scene.add_component(a, "Light").unwrap();
        sync(&mut window, &mut scene);
        assert_eq!(window.list().visible_rows(), vec!["Scene", "  A", "    Light", "  B"]);

        scene.rename_node(b, "Bee");
        scene.set_node_enabled(a, false);
        sync(&mut window, &mut scene);
        assert_eq!(
            window.list().visible_rows(),
            vec!["Scene", "  A (disabled)", "    Light", "  Bee"]
        );

        scene.remove_component(light);
        scene.remove_node(b);
        sync(&mut window, &mut scene);
        assert_eq!(window.list().visible_rows(), vec!["Scene", "  A (disabled)"]);
        assert!(window.item_for_node(b).is_none());
        assert!(window.item_for_component(light).is_none());
    }

    #[test]
    fn test_removing_subtree_forgets_descendants() {
        let mut scene = Scene::new();
        let mut window = window_for(&scene);
        let parent = scene.create_node(scene.root(), "parent").unwrap();
        let child = scene.create_node(parent, "child").unwrap();
        sync(&mut window, &mut scene);
        assert!(window.item_for_node(child).is_some());

        scene.remove_node(parent);
        sync(&mut window, &mut scene);
        assert!(window.item_for_node(child).is_none());
        assert_eq!(window.list().visible_rows(), vec!["Scene"]);
    }

    #[test]
    fn test_programmatic_selection_is_not_echoed() {
        let mut scene = Scene::new();
        let a = scene.create_node(scene.root(), "A").unwrap();
        scene.take_events();
        let mut window = window_for(&scene);

        let mut selection = Selection::new();
        selection.set([a]);
        window.set_selection(&selection);
        assert_eq!(window.selected_nodes(), vec![a]);
        assert_eq!(window.poll_selection(), None);
    }

    #[test]
    fn test_user_click_is_reported() {
        let mut scene = Scene::new();
        let a = scene.create_node(scene.root(), "A").unwrap();
        let light = scene.add_component(a, "Light").unwrap();
        scene.take_events();
        let mut window = window_for(&scene);

        let item = window.item_for_node(a).unwrap();
        window.list_mut().click_item(item);
        assert_eq!(window.poll_selection(), Some(vec![a]));
        assert_eq!(window.poll_selection(), None);

        let row = window.item_for_component(light).unwrap();
        window.list_mut().click_item(row);
        assert_eq!(window.poll_selection(), Some(vec![]));
    }
}

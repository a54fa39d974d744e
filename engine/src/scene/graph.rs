//! In-memory scene graph
//!
//! Nodes form a tree under a single root. Each node has a local transform;
//! world transforms compose through the parent chain (scale, then rotation,
//! then translation). Every mutation queues a [`SceneEvent`].

use std::collections::HashMap;

use glam::{Quat, Vec3};

use super::{ComponentId, NodeId, SceneEvent, SceneGraph, TransformSnapshot};
use crate::events::EventQueue;
use crate::viewport::Ray;

/// A component attached to a node. Only the type name matters to the editor core.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub type_name: String,
}

/// One node of the scene tree.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub enabled: bool,
    pub transform: TransformSnapshot,
    pub components: Vec<Component>,
}

impl SceneNode {
    fn new(id: NodeId, parent: Option<NodeId>, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            parent,
            children: Vec::new(),
            enabled: true,
            transform: TransformSnapshot::IDENTITY,
            components: Vec::new(),
        }
    }
}

/// Scene graph with stable node and component ids.
#[derive(Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, SceneNode>,
    component_owner: HashMap<ComponentId, NodeId>,
    root: NodeId,
    next_node_id: u32,
    next_component_id: u32,
    events: EventQueue<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene containing only the root node.
    pub fn new() -> Self {
        let root = NodeId(1);
        let mut nodes = HashMap::new();
        nodes.insert(root, SceneNode::new(root, None, "Scene"));
        Self {
            nodes,
            component_owner: HashMap::new(),
            root,
            next_node_id: 2,
            next_component_id: 1,
            events: EventQueue::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Children of a node in insertion order (empty if the node is gone).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Create a child of `parent`. Returns `None` if the parent does not exist.
    pub fn create_node(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;

        self.nodes.insert(id, SceneNode::new(id, Some(parent), name));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        self.events.push(SceneEvent::NodeAdded { node: id, parent });
        Some(id)
    }

    /// Remove a node and its subtree. The root cannot be removed.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|&c| c != id);
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                for component in &node.components {
                    self.component_owner.remove(&component.id);
                }
                pending.extend(node.children);
            }
        }
        self.events.push(SceneEvent::NodeRemoved { node: id, parent });
        true
    }

    pub fn rename_node(&mut self, id: NodeId, name: &str) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.name != name {
            node.name = name.to_string();
            self.events.push(SceneEvent::NodeNameChanged { node: id });
        }
        true
    }

    pub fn set_node_enabled(&mut self, id: NodeId, enabled: bool) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if node.enabled != enabled {
            node.enabled = enabled;
            self.events.push(SceneEvent::NodeEnabledChanged { node: id });
        }
        true
    }

    /// Attach a component of the given type to a node.
    pub fn add_component(&mut self, node: NodeId, type_name: &str) -> Option<ComponentId> {
        let owner = self.nodes.get_mut(&node)?;
        let id = ComponentId(self.next_component_id);
        self.next_component_id += 1;

        owner.components.push(Component {
            id,
            type_name: type_name.to_string(),
        });
        self.component_owner.insert(id, node);
        self.events.push(SceneEvent::ComponentAdded { node, component: id });
        Some(id)
    }

    pub fn remove_component(&mut self, component: ComponentId) -> bool {
        let Some(node) = self.component_owner.remove(&component) else {
            return false;
        };
        if let Some(owner) = self.nodes.get_mut(&node) {
            owner.components.retain(|c| c.id != component);
        }
        self.events.push(SceneEvent::ComponentRemoved { node, component });
        true
    }

    /// Look up a component and the node that owns it.
    pub fn component(&self, component: ComponentId) -> Option<(NodeId, &Component)> {
        let node = *self.component_owner.get(&component)?;
        let owner = self.nodes.get(&node)?;
        owner
            .components
            .iter()
            .find(|c| c.id == component)
            .map(|c| (node, c))
    }

    /// World-space transform, composed through all ancestors.
    pub fn world_transform(&self, id: NodeId) -> Option<TransformSnapshot> {
        let node = self.nodes.get(&id)?;
        let local = node.transform;
        match node.parent.and_then(|p| self.world_transform(p)) {
            Some(parent) => Some(TransformSnapshot {
                position: parent.position + parent.rotation * (parent.scale * local.position),
                rotation: parent.rotation * local.rotation,
                scale: parent.scale * local.scale,
            }),
            None => Some(local),
        }
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.world_transform(id).map(|t| t.position)
    }

    pub fn world_rotation(&self, id: NodeId) -> Option<Quat> {
        self.world_transform(id).map(|t| t.rotation)
    }

    fn parent_world(&self, id: NodeId) -> Option<TransformSnapshot> {
        match self.nodes.get(&id)?.parent {
            Some(parent) => self.world_transform(parent),
            None => Some(TransformSnapshot::IDENTITY),
        }
    }

    /// Move a node so its world position becomes `position`.
    pub fn set_world_position(&mut self, id: NodeId, position: Vec3) -> bool {
        let Some(parent) = self.parent_world(id) else {
            return false;
        };
        let offset = parent.rotation.inverse() * (position - parent.position);
        // Flattened parent axes keep the node's current local coordinate
        let flat = parent.scale.cmpeq(Vec3::ZERO);
        let local = offset / Vec3::select(flat, Vec3::ONE, parent.scale);
        self.update_local(id, |t| t.position = Vec3::select(flat, t.position, local))
    }

    /// Nearest enabled node whose world position lies within `radius` of
    /// `ray` and that passes `filter`. The root is never picked.
    pub fn pick(&self, ray: &Ray, radius: f32, filter: impl Fn(&SceneNode) -> bool) -> Option<NodeId> {
        let mut best: Option<(f32, NodeId)> = None;
        for node in self.nodes.values() {
            if node.id == self.root || !node.enabled || !filter(node) {
                continue;
            }
            let Some(position) = self.world_position(node.id) else {
                continue;
            };
            let t = (position - ray.origin).dot(ray.direction);
            if t < 0.0 || ray.point_at(t).distance(position) > radius {
                continue;
            }
            let closer = match best {
                Some((best_t, best_id)) => t < best_t || (t == best_t && node.id < best_id),
                None => true,
            };
            if closer {
                best = Some((t, node.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Rotate a node so its world rotation becomes `rotation`.
    pub fn set_world_rotation(&mut self, id: NodeId, rotation: Quat) -> bool {
        let Some(parent) = self.parent_world(id) else {
            return false;
        };
        let local = (parent.rotation.inverse() * rotation).normalize();
        self.update_local(id, |t| t.rotation = local)
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> bool {
        self.update_local(id, |t| t.position = position)
    }

    pub fn set_rotation(&mut self, id: NodeId, rotation: Quat) -> bool {
        self.update_local(id, |t| t.rotation = rotation)
    }

    pub fn set_scale(&mut self, id: NodeId, scale: Vec3) -> bool {
        self.update_local(id, |t| t.scale = scale)
    }

    fn update_local(&mut self, id: NodeId, apply: impl FnOnce(&mut TransformSnapshot)) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        apply(&mut node.transform);
        self.events.push(SceneEvent::NodeTransformChanged { node: id });
        true
    }

    /// Take all queued scene events.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        self.events.drain()
    }
}

impl SceneGraph for Scene {
    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn node_transform(&self, node: NodeId) -> Option<TransformSnapshot> {
        self.nodes.get(&node).map(|n| n.transform)
    }

    fn set_node_transform(&mut self, node: NodeId, transform: &TransformSnapshot) -> bool {
        let transform = *transform;
        self.update_local(node, |t| *t = transform)
    }
}

//! Selected nodes
//!
//! Ordered, duplicate-free set of node ids. Ids of nodes that have since left
//! the scene are skipped by the geometric queries.

use glam::{Quat, Vec3};

use super::{NodeId, Scene};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection. Duplicates are dropped, first occurrence wins.
    pub fn set(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        self.nodes.clear();
        for node in nodes {
            self.add(node);
        }
    }

    /// Add a node. Returns `false` if it was already selected.
    pub fn add(&mut self, node: NodeId) -> bool {
        if self.nodes.contains(&node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn remove(&mut self, node: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|&n| n != node);
        self.nodes.len() != before
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop ids whose nodes no longer exist.
    pub fn retain_existing(&mut self, scene: &Scene) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|&n| scene.node(n).is_some());
        self.nodes.len() != before
    }

    /// Average world position of the selected nodes that still exist.
    pub fn center(&self, scene: &Scene) -> Option<Vec3> {
        let positions: Vec<Vec3> = self
            .nodes
            .iter()
            .filter_map(|&n| scene.world_position(n))
            .collect();
        if positions.is_empty() {
            return None;
        }
        let sum: Vec3 = positions.iter().copied().sum();
        Some(sum / positions.len() as f32)
    }

    /// World rotation of the single selected node, identity otherwise.
    pub fn rotation(&self, scene: &Scene) -> Quat {
        match self.nodes.as_slice() {
            [only] => scene.world_rotation(*only).unwrap_or(Quat::IDENTITY),
            _ => Quat::IDENTITY,
        }
    }
}

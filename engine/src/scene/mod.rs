//! Scene Module
//!
//! Minimal scene graph the editor core operates on. Undo commands never hold
//! references into the scene: they keep a [`NodeId`] and re-resolve it
//! through [`SceneGraph`] when applied.

pub mod graph;
pub mod selection;
pub mod transformable;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

pub use graph::{Scene, SceneNode};
pub use selection::Selection;
pub use transformable::{SelectionTransform, TransformChanged};

/// Stable node identifier. Ids are never reused within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Stable component identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

/// Local position, rotation and scale of one node at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TransformSnapshot {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }
}

/// Entity lookup used by undo commands.
pub trait SceneGraph {
    /// Whether a node with this id exists.
    fn contains(&self, node: NodeId) -> bool;
    /// Local transform of a node, `None` if it no longer exists.
    fn node_transform(&self, node: NodeId) -> Option<TransformSnapshot>;
    /// Replace a node's local transform. Returns `false` if the node is gone.
    fn set_node_transform(&mut self, node: NodeId, transform: &TransformSnapshot) -> bool;
}

/// Scene-graph change notifications.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    NodeAdded { node: NodeId, parent: NodeId },
    /// The node and its whole subtree left the scene.
    NodeRemoved { node: NodeId, parent: NodeId },
    NodeNameChanged { node: NodeId },
    NodeEnabledChanged { node: NodeId },
    NodeTransformChanged { node: NodeId },
    ComponentAdded { node: NodeId, component: ComponentId },
    ComponentRemoved { node: NodeId, component: ComponentId },
}

//! Selection transforms with undo support
//!
//! [`SelectionTransform`] captures the transforms of the selected nodes when
//! a gizmo drag starts, applies incremental changes while the drag runs, and
//! on release pushes one [`CommandGroup`] holding a [`TransformChanged`] per
//! node. A multi-node drag is therefore a single undo step.

use glam::{Quat, Vec3};
use log::debug;

use super::{NodeId, Scene, SceneGraph, Selection, TransformSnapshot};
use crate::undo::{Command, CommandGroup, UndoStack};

/// Label of the history entry produced by [`SelectionTransform::end`].
pub const TRANSFORM_GROUP_LABEL: &str = "Node Transforms";

/// Before/after local transform of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformChanged {
    node: NodeId,
    old: TransformSnapshot,
    new: TransformSnapshot,
}

impl TransformChanged {
    pub fn new(node: NodeId, old: TransformSnapshot, new: TransformSnapshot) -> Self {
        Self { node, old, new }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Command for TransformChanged {
    fn label(&self) -> &str {
        "Transform"
    }

    fn undo(&self, scene: &mut dyn SceneGraph) {
        // Missing node: nothing to restore
        scene.set_node_transform(self.node, &self.old);
    }

    fn redo(&self, scene: &mut dyn SceneGraph) {
        scene.set_node_transform(self.node, &self.new);
    }
}

/// Round every component of `v` to the nearest multiple of `step`.
fn snap_vector(v: Vec3, step: f32) -> Vec3 {
    if step <= 0.0 {
        return v;
    }
    (v / step).round() * step
}

/// Snap the angle of `q` to a multiple of `step_degrees` about its own axis.
fn snap_rotation(q: Quat, step_degrees: f32) -> Quat {
    if step_degrees <= 0.0 {
        return q;
    }
    let (axis, angle) = q.to_axis_angle();
    let snapped = (angle.to_degrees() / step_degrees).round() * step_degrees;
    Quat::from_axis_angle(axis, snapped.to_radians())
}

/// In-progress transformation of the selected nodes.
///
/// Snapped moves and rotations accumulate the raw drag and only apply the
/// snapped part, so small per-frame deltas still add up to a step.
#[derive(Debug)]
pub struct SelectionTransform {
    initial: Vec<(NodeId, TransformSnapshot)>,
    translation: Vec3,
    applied_translation: Vec3,
    rotation: Quat,
    applied_rotation: Quat,
}

impl Default for SelectionTransform {
    fn default() -> Self {
        Self {
            initial: Vec::new(),
            translation: Vec3::ZERO,
            applied_translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            applied_rotation: Quat::IDENTITY,
        }
    }
}

impl SelectionTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transformation is in progress.
    pub fn is_active(&self) -> bool {
        !self.initial.is_empty()
    }

    /// Nodes captured by [`SelectionTransform::start`].
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.initial.iter().map(|(n, _)| *n)
    }

    /// Capture the current transforms of the selected nodes.
    pub fn start(&mut self, scene: &Scene, selection: &Selection) {
        self.reset_drag();
        self.initial = selection
            .nodes()
            .iter()
            .filter(|&&n| n != scene.root())
            .filter_map(|&n| scene.node_transform(n).map(|t| (n, t)))
            .collect();
    }

    /// Average world position of the captured nodes.
    pub fn pivot(&self, scene: &Scene) -> Option<Vec3> {
        let positions: Vec<Vec3> = self
            .nodes()
            .filter_map(|n| scene.world_position(n))
            .collect();
        if positions.is_empty() {
            return None;
        }
        Some(positions.iter().copied().sum::<Vec3>() / positions.len() as f32)
    }

    /// Translate every captured node in world space.
    pub fn apply_position_change(&self, scene: &mut Scene, delta: Vec3) {
        for node in self.nodes() {
            if let Some(position) = scene.world_position(node) {
                scene.set_world_position(node, position + delta);
            }
        }
    }

    /// Rotate every captured node about the selection pivot.
    pub fn apply_rotation_change(&self, scene: &mut Scene, delta: Quat) {
        let Some(origin) = self.pivot(scene) else {
            return;
        };
        for node in self.nodes() {
            let (Some(position), Some(rotation)) =
                (scene.world_position(node), scene.world_rotation(node))
            else {
                continue;
            };
            let offset = position - origin;
            scene.set_world_rotation(node, delta * rotation);
            scene.set_world_position(node, origin + delta * offset);
        }
    }

    /// Accumulate a world-space move and apply it in multiples of `step`.
    /// A step of zero applies `delta` as is.
    pub fn translate_snapped(&mut self, scene: &mut Scene, delta: Vec3, step: f32) {
        self.translation += delta;
        let target = snap_vector(self.translation, step);
        let change = target - self.applied_translation;
        if change != Vec3::ZERO {
            self.apply_position_change(scene, change);
        }
        self.applied_translation = target;
    }

    /// Accumulate a rotation about the pivot and apply it in multiples of
    /// `step_degrees`. A step of zero applies `delta` as is.
    pub fn rotate_snapped(&mut self, scene: &mut Scene, delta: Quat, step_degrees: f32) {
        self.rotation = (delta * self.rotation).normalize();
        let target = snap_rotation(self.rotation, step_degrees);
        let change = (target * self.applied_rotation.inverse()).normalize();
        if change != Quat::IDENTITY {
            self.apply_rotation_change(scene, change);
        }
        self.applied_rotation = target;
    }

    fn reset_drag(&mut self) {
        self.translation = Vec3::ZERO;
        self.applied_translation = Vec3::ZERO;
        self.rotation = Quat::IDENTITY;
        self.applied_rotation = Quat::IDENTITY;
    }

    /// Add `delta` to the local scale of every captured node.
    pub fn apply_scale_change(&self, scene: &mut Scene, delta: Vec3) {
        for node in self.nodes() {
            if let Some(t) = scene.node_transform(node) {
                scene.set_scale(node, t.scale + delta);
            }
        }
    }

    /// Snap local scales to multiples of `step`.
    pub fn snap_scale(&self, scene: &mut Scene, step: f32) {
        for node in self.nodes() {
            if let Some(t) = scene.node_transform(node) {
                scene.set_scale(node, snap_vector(t.scale, step));
            }
        }
    }

    /// Finish the transformation and record it as one history entry.
    ///
    /// Returns `false` when nothing was captured. Nodes removed during the
    /// drag are left out of the entry.
    pub fn end(&mut self, scene: &Scene, undo: &mut UndoStack) -> bool {
        self.reset_drag();
        if self.initial.is_empty() {
            return false;
        }

        let mut group = CommandGroup::new(TRANSFORM_GROUP_LABEL);
        for (node, old) in self.initial.drain(..) {
            if let Some(new) = scene.node_transform(node) {
                group.push(TransformChanged::new(node, old, new));
            }
        }
        if group.is_empty() {
            return false;
        }
        debug!("transform: recording {} node(s)", group.len());
        undo.push(group);
        true
    }

    /// Abandon the transformation, restoring the captured transforms.
    pub fn cancel(&mut self, scene: &mut Scene) {
        self.reset_drag();
        for (node, old) in self.initial.drain(..) {
            scene.set_node_transform(node, &old);
        }
    }
}

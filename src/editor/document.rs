//! Scene document
//!
//! One open scene with everything that edits it: the selection, the undo
//! history, the viewports and the in-progress gizmo transform. The host
//! calls [`SceneDocument::update`] once per frame and drains
//! [`SceneDocument::take_events`] afterwards.

use glam::{Quat, Vec3};
use log::debug;

use crate::config::{CameraSettings, Configuration, PickMode, SnapSettings};
use crate::events::{EditorEvent, EventQueue};
use crate::input::SceneInput;
use crate::scene::{NodeId, Scene, Selection, SelectionTransform};
use crate::undo::UndoStack;
use crate::viewport::{ViewportLayout, ViewportManager};

/// Distance from the cursor ray within which a node origin counts as hit.
pub const PICK_RADIUS: f32 = 0.5;

#[derive(Debug)]
pub struct SceneDocument {
    scene: Scene,
    selection: Selection,
    undo: UndoStack,
    viewports: ViewportManager,
    transform: SelectionTransform,
    events: EventQueue<EditorEvent>,
}

impl SceneDocument {
    /// Empty scene rendered on a `width` x `height` surface.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            scene: Scene::new(),
            selection: Selection::new(),
            undo: UndoStack::new(),
            viewports: ViewportManager::new(width, height),
            transform: SelectionTransform::new(),
            events: EventQueue::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Direct scene access. Changes made here are not recorded in history.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn viewports(&self) -> &ViewportManager {
        &self.viewports
    }

    pub fn viewports_mut(&mut self) -> &mut ViewportManager {
        &mut self.viewports
    }

    /// Run one frame of viewport navigation.
    pub fn update(&mut self, input: &mut dyn SceneInput, time_step: f32, config: &Configuration) {
        if self.selection.retain_existing(&self.scene) {
            self.events.push(EditorEvent::SelectionChanged);
        }
        let settings = CameraSettings::from_config(config);
        let center = self.selection.center(&self.scene);
        self.viewports.update(input, time_step, &settings, center);
    }

    pub fn set_layout(&mut self, layout: ViewportLayout) {
        self.viewports.set_layout(layout);
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.viewports.resize(width, height);
    }

    /// Replace the selection. Missing nodes are ignored.
    pub fn set_selection(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        let scene = &self.scene;
        let nodes: Vec<NodeId> = nodes.into_iter().filter(|&n| scene.node(n).is_some()).collect();
        if nodes == self.selection.nodes() {
            return;
        }
        self.selection.set(nodes);
        debug!("document: {} node(s) selected", self.selection.len());
        self.events.push(EditorEvent::SelectionChanged);
    }

    /// Select the node under the active viewport's cursor ray that matches
    /// the configured pick mode. A miss clears the selection.
    pub fn pick(&mut self, config: &Configuration) -> Option<NodeId> {
        let ray = self.viewports.current_ray()?;
        let mode = PickMode::from_config(config);
        let hit = self.scene.pick(&ray, PICK_RADIUS, |node| {
            node.components.iter().any(|c| mode.matches(&c.type_name))
        });
        self.set_selection(hit);
        hit
    }

    pub fn undo(&mut self) -> bool {
        self.undo.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> bool {
        self.undo.redo(&mut self.scene)
    }

    // ------------------------------------------------------------------------
    // Gizmo transforms
    // ------------------------------------------------------------------------

    /// Capture the selected nodes' transforms before a drag.
    pub fn begin_transform(&mut self) {
        self.transform.start(&self.scene, &self.selection);
    }

    pub fn is_transforming(&self) -> bool {
        self.transform.is_active()
    }

    /// Move the selection in world space, in position steps when position
    /// snapping is enabled.
    pub fn translate_selection(&mut self, delta: Vec3, config: &Configuration) {
        let snap = SnapSettings::from_config(config);
        self.transform
            .translate_snapped(&mut self.scene, delta, snap.position_step);
    }

    /// Rotate the selection about its pivot, in rotation steps (degrees) when
    /// rotation snapping is enabled.
    pub fn rotate_selection(&mut self, delta: Quat, config: &Configuration) {
        let snap = SnapSettings::from_config(config);
        self.transform
            .rotate_snapped(&mut self.scene, delta, snap.rotation_step);
    }

    /// Grow the selection's scale, snapping when scale snapping is enabled.
    pub fn scale_selection(&mut self, delta: Vec3, config: &Configuration) {
        self.transform.apply_scale_change(&mut self.scene, delta);
        let snap = SnapSettings::from_config(config);
        if snap.scale_step > 0.0 {
            self.transform.snap_scale(&mut self.scene, snap.scale_step);
        }
    }

    /// Finish the drag as one undo step. `false` when nothing was captured.
    pub fn end_transform(&mut self) -> bool {
        self.transform.end(&self.scene, &mut self.undo)
    }

    pub fn cancel_transform(&mut self) {
        self.transform.cancel(&mut self.scene);
    }

    /// All events queued since the last call: document events first, then
    /// scene, history and viewport events.
    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        let mut events = self.events.drain();
        events.extend(self.scene.take_events().into_iter().map(EditorEvent::Scene));
        events.extend(self.undo.take_events());
        events.extend(self.viewports.take_events());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::register_scene_editor_variables;
    use crate::config::scene_settings::{
        VAR_PICK_MODE, VAR_SNAP_POSITION, VAR_SNAP_POSITION_STEP, VAR_SNAP_SCALE, VAR_SNAP_SCALE_STEP,
    };
    use crate::config::ConfigValue;
    use crate::input::{InputState, KeyCode};
    use crate::scene::SceneEvent;

    fn config() -> Configuration {
        let mut config = Configuration::new();
        register_scene_editor_variables(&mut config);
        config
    }

    #[test]
    fn test_new_document_events() {
        let mut doc = SceneDocument::new(800, 600);
        assert_eq!(
            doc.take_events(),
            vec![EditorEvent::ViewportsChanged {
                layout: ViewportLayout::Single,
                count: 1
            }]
        );
    }

    #[test]
    fn test_selection_events() {
        let mut doc = SceneDocument::new(800, 600);
        let root = doc.scene().root();
        let a = doc.scene_mut().create_node(root, "a").unwrap();
        doc.take_events();

        doc.set_selection([a, NodeId(999)]);
        doc.set_selection([a]);
        assert_eq!(doc.selection().nodes(), &[a]);
        assert_eq!(doc.take_events(), vec![EditorEvent::SelectionChanged]);

        doc.scene_mut().remove_node(a);
        doc.update(&mut InputState::new(), 0.016, &config());
        let events = doc.take_events();
        assert!(events.contains(&EditorEvent::SelectionChanged));
        assert!(events.contains(&EditorEvent::Scene(SceneEvent::NodeRemoved { node: a, parent: root })));
        assert!(doc.selection().is_empty());
    }

    #[test]
    fn test_transform_round_trip() {
        let mut doc = SceneDocument::new(800, 600);
        let root = doc.scene().root();
        let a = doc.scene_mut().create_node(root, "a").unwrap();
        doc.set_selection([a]);

        doc.begin_transform();
        doc.translate_selection(Vec3::new(1.0, 2.0, 3.0), &config());
        assert!(doc.end_transform());
        assert_eq!(doc.scene().world_position(a), Some(Vec3::new(1.0, 2.0, 3.0)));

        assert!(doc.undo());
        assert_eq!(doc.scene().world_position(a), Some(Vec3::ZERO));
        assert!(doc.redo());
        assert_eq!(doc.scene().world_position(a), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(doc.take_events().contains(&EditorEvent::HistoryChanged));
    }

    #[test]
    fn test_scale_snaps_when_enabled() {
        let mut config = config();
        config.set_value(VAR_SNAP_SCALE, ConfigValue::Bool(true)).unwrap();
        config.set_value(VAR_SNAP_SCALE_STEP, ConfigValue::Double(0.5)).unwrap();

        let mut doc = SceneDocument::new(800, 600);
        let root = doc.scene().root();
        let a = doc.scene_mut().create_node(root, "a").unwrap();
        doc.set_selection([a]);
        doc.begin_transform();
        doc.scale_selection(Vec3::splat(0.3), &config);
        doc.end_transform();
        assert_eq!(doc.scene().node(a).unwrap().transform.scale, Vec3::splat(1.5));
    }

    #[test]
    fn test_translate_snaps_when_enabled() {
        let mut config = config();
        config.set_value(VAR_SNAP_POSITION, ConfigValue::Bool(true)).unwrap();
        config.set_value(VAR_SNAP_POSITION_STEP, ConfigValue::Double(1.0)).unwrap();

        let mut doc = SceneDocument::new(800, 600);
        let root = doc.scene().root();
        let a = doc.scene_mut().create_node(root, "a").unwrap();
        doc.set_selection([a]);
        doc.begin_transform();
        for _ in 0..2 {
            doc.translate_selection(Vec3::X * 0.2, &config);
        }
        assert_eq!(doc.scene().world_position(a), Some(Vec3::ZERO));
        doc.translate_selection(Vec3::X * 0.2, &config);
        let moved = doc.scene().world_position(a).unwrap();
        assert!((moved - Vec3::X).length() < 1e-5);
        assert!(doc.end_transform());
    }

    #[test]
    fn test_pick_follows_pick_mode() {
        let mut config = config();
        let mut doc = SceneDocument::new(800, 600);
        let root = doc.scene().root();
        let model = doc.scene_mut().create_node(root, "model").unwrap();
        doc.scene_mut().add_component(model, "StaticModel");
        let lamp = doc.scene_mut().create_node(root, "lamp").unwrap();
        doc.scene_mut().add_component(lamp, "Light");

        // Both sit on the center ray of the default camera
        let camera = doc.viewports().current_camera().unwrap().clone();
        doc.scene_mut().set_position(model, camera.position + camera.forward() * 5.0);
        doc.scene_mut().set_position(lamp, camera.position + camera.forward() * 8.0);

        let mut input = InputState::new();
        input.mouse.set_position(400, 300);
        doc.update(&mut input, 0.016, &config);

        assert_eq!(doc.pick(&config), Some(model));
        assert_eq!(doc.selection().nodes(), &[model]);

        config.set_value(VAR_PICK_MODE, ConfigValue::Int(1)).unwrap();
        assert_eq!(doc.pick(&config), Some(lamp));

        config.set_value(VAR_PICK_MODE, ConfigValue::Int(2)).unwrap();
        assert_eq!(doc.pick(&config), None);
        assert!(doc.selection().is_empty());
    }

    #[test]
    fn test_update_moves_active_camera() {
        let mut doc = SceneDocument::new(800, 600);
        let before = doc.viewports().current_camera().unwrap().position;
        let mut input = InputState::new();
        input.handle_key(KeyCode::E, true);
        doc.update(&mut input, 1.0, &config());
        let after = doc.viewports().current_camera().unwrap().position;
        assert!((after.y - before.y - 5.0).abs() < 1e-4);
    }
}

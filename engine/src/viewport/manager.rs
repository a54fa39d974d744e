//! Viewport manager
//!
//! Owns the viewports of one document, keeps their count and rectangles in
//! step with the current [`ViewportLayout`] and surface size, tracks which
//! viewport is active and forwards per-frame input to it.

use glam::{IVec2, Quat, Vec2, Vec3};
use log::debug;

use super::camera::{Ray, ViewportCamera};
use super::controller::{Viewport, ViewportUpdateParams};
use super::layout::{IntRect, ViewportLayout};
use crate::config::CameraSettings;
use crate::events::{EditorEvent, EventQueue};
use crate::input::{MouseButton, SceneInput};

/// Camera position given to the first viewport.
pub const DEFAULT_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 10.0, -10.0);

/// Camera orientation given to the first viewport: 45 degrees pitched down.
pub fn default_camera_rotation() -> Quat {
    Quat::from_rotation_x(45f32.to_radians())
}

#[derive(Debug)]
pub struct ViewportManager {
    viewports: Vec<Viewport>,
    layout: ViewportLayout,
    active: usize,
    width: i32,
    height: i32,
    current_ray: Option<Ray>,
    events: EventQueue<EditorEvent>,
}

impl ViewportManager {
    /// Create a manager for a `width` x `height` surface with one viewport.
    pub fn new(width: i32, height: i32) -> Self {
        let mut manager = Self {
            viewports: Vec::new(),
            layout: ViewportLayout::Empty,
            active: 0,
            width,
            height,
            current_ray: None,
            events: EventQueue::new(),
        };
        manager.set_layout(ViewportLayout::Single);
        manager
    }

    /// Switch layout. New viewports copy the camera of the last existing
    /// one, or the default camera when there is none.
    pub fn set_layout(&mut self, layout: ViewportLayout) {
        self.layout = layout;
        self.resize_viewports(layout.viewport_count());
        self.retile();
        self.active = self.active.min(self.viewports.len().saturating_sub(1));
        debug!(
            "viewport: layout {} ({} viewports)",
            layout.name(),
            self.viewports.len()
        );
        self.events.push(EditorEvent::ViewportsChanged {
            layout,
            count: self.viewports.len(),
        });
    }

    /// Track a new surface size.
    pub fn resize(&mut self, width: i32, height: i32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.retile();
    }

    /// Pick the active viewport and run its camera controller.
    pub fn update(
        &mut self,
        input: &mut dyn SceneInput,
        time_step: f32,
        settings: &CameraSettings,
        selection_center: Option<Vec3>,
    ) {
        if self.viewports.is_empty() {
            self.current_ray = None;
            return;
        }

        let buttons_held = [MouseButton::Left, MouseButton::Right, MouseButton::Middle]
            .into_iter()
            .any(|b| input.is_mouse_button_down(b));
        if !buttons_held {
            self.select_viewport(input.mouse_position());
        }

        self.current_ray = self.compute_camera_ray(input.mouse_position());
        let active = self.active;
        self.viewports[active].update(ViewportUpdateParams {
            time_step,
            input,
            settings,
            selection_center,
        });
    }

    /// Ray from the active camera through a surface pixel.
    ///
    /// A viewport with a zero-size rectangle covers the whole surface.
    pub fn compute_camera_ray(&self, mouse: IVec2) -> Option<Ray> {
        let viewport = self.current_viewport()?;
        let rect = if viewport.rect.is_zero_size() {
            IntRect::new(0, 0, self.width, self.height)
        } else {
            viewport.rect
        };
        let (w, h) = (rect.width().max(1) as f32, rect.height().max(1) as f32);
        let screen = Vec2::new((mouse.x - rect.left) as f32 / w, (mouse.y - rect.top) as f32 / h);
        Some(viewport.camera.screen_ray(screen, w / h))
    }

    /// Ray under the cursor computed by the last [`ViewportManager::update`].
    pub fn current_ray(&self) -> Option<Ray> {
        self.current_ray
    }

    pub fn current_viewport(&self) -> Option<&Viewport> {
        self.viewports.get(self.active)
    }

    pub fn current_viewport_mut(&mut self) -> Option<&mut Viewport> {
        self.viewports.get_mut(self.active)
    }

    pub fn current_camera(&self) -> Option<&ViewportCamera> {
        self.current_viewport().map(|v| &v.camera)
    }

    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    pub fn layout(&self) -> ViewportLayout {
        self.layout
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn surface_size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    pub fn take_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain()
    }

    fn resize_viewports(&mut self, count: usize) {
        if count <= self.viewports.len() {
            self.viewports.truncate(count);
            return;
        }
        let (position, rotation) = match self.viewports.last() {
            Some(last) => (last.camera.position, last.camera.rotation),
            None => (DEFAULT_CAMERA_POSITION, default_camera_rotation()),
        };
        self.viewports
            .resize_with(count, || Viewport::new(position, rotation));
    }

    fn retile(&mut self) {
        let rects = self.layout.tile(self.width, self.height);
        for (viewport, rect) in self.viewports.iter_mut().zip(rects) {
            viewport.rect = rect;
        }
    }

    fn select_viewport(&mut self, mouse: IVec2) {
        let hit = self
            .viewports
            .iter()
            .position(|v| v.rect.is_zero_size() || v.rect.contains(mouse));
        if let Some(index) = hit {
            if index != self.active {
                debug!("viewport: active {} -> {}", self.active, index);
                self.active = index;
                self.events.push(EditorEvent::ActiveViewportChanged { index });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    #[test]
    fn test_starts_single_full_surface() {
        let manager = ViewportManager::new(800, 600);
        assert_eq!(manager.layout(), ViewportLayout::Single);
        assert_eq!(manager.viewports().len(), 1);
        assert_eq!(manager.viewports()[0].rect, IntRect::new(0, 0, 800, 600));
        assert_eq!(manager.current_camera().unwrap().position, DEFAULT_CAMERA_POSITION);
    }

    #[test]
    fn test_new_viewports_copy_last_camera() {
        let mut manager = ViewportManager::new(800, 600);
        manager.current_viewport_mut().unwrap().camera.position = Vec3::new(1.0, 2.0, 3.0);
        manager.set_layout(ViewportLayout::Quad);
        for viewport in manager.viewports() {
            assert_eq!(viewport.camera.position, Vec3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn test_empty_layout_has_no_current() {
        let mut manager = ViewportManager::new(800, 600);
        manager.set_layout(ViewportLayout::Empty);
        assert!(manager.current_viewport().is_none());
        assert!(manager.compute_camera_ray(IVec2::ZERO).is_none());

        let mut input = InputState::new();
        manager.update(&mut input, 0.016, &CameraSettings::default(), None);
        assert!(manager.current_ray().is_none());
    }

    #[test]
    fn test_active_index_clamped_on_shrink() {
        let mut manager = ViewportManager::new(800, 600);
        manager.set_layout(ViewportLayout::Quad);
        let mut input = InputState::new();
        input.mouse.set_position(700, 500);
        manager.update(&mut input, 0.016, &CameraSettings::default(), None);
        assert_eq!(manager.active_index(), 3);

        manager.set_layout(ViewportLayout::Vertical);
        assert_eq!(manager.active_index(), 1);
    }

    #[test]
    fn test_held_button_keeps_active_viewport() {
        let mut manager = ViewportManager::new(800, 600);
        manager.set_layout(ViewportLayout::Vertical);
        let mut input = InputState::new();
        input.mouse.set_position(100, 100);
        input.handle_mouse_button(MouseButton::Left, true);
        input.mouse.set_position(700, 100);
        manager.update(&mut input, 0.016, &CameraSettings::default(), None);
        assert_eq!(manager.active_index(), 0);
    }

    #[test]
    fn test_resize_retiles() {
        let mut manager = ViewportManager::new(800, 600);
        manager.set_layout(ViewportLayout::Horizontal);
        manager.resize(400, 300);
        assert_eq!(manager.viewports()[1].rect, IntRect::new(0, 150, 400, 300));
    }

    #[test]
    fn test_layout_and_active_events() {
        let mut manager = ViewportManager::new(800, 600);
        manager.take_events();
        manager.set_layout(ViewportLayout::Vertical);
        let mut input = InputState::new();
        input.mouse.set_position(500, 10);
        manager.update(&mut input, 0.016, &CameraSettings::default(), None);
        assert_eq!(
            manager.take_events(),
            vec![
                EditorEvent::ViewportsChanged {
                    layout: ViewportLayout::Vertical,
                    count: 2
                },
                EditorEvent::ActiveViewportChanged { index: 1 },
            ]
        );
    }

    #[test]
    fn test_zero_surface_ray_uses_full_surface() {
        let manager = ViewportManager::new(0, 0);
        let ray = manager.compute_camera_ray(IVec2::ZERO).unwrap();
        assert!(ray.direction.is_finite());
    }
}

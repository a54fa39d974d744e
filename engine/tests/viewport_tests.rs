//! Viewport Tests - Layout Tiling and Viewport Manager
//!
//! Tests for layout viewport counts, exact tiling of the surface, and the
//! manager's active-viewport tracking.

use glam::{IVec2, Vec3};
use scene_editor_core::input::{InputState, MouseButton};
use scene_editor_core::viewport::{IntRect, ViewportLayout, ViewportManager};
use scene_editor_core::{CameraSettings, EditorEvent};

// ============================================================================
// Layout tiling
// ============================================================================

#[test]
fn test_layout_viewport_counts() {
    let expected = [0, 1, 2, 2, 4, 3, 3, 3, 3];
    for (layout, count) in ViewportLayout::ALL.into_iter().zip(expected) {
        assert_eq!(layout.viewport_count(), count, "{}", layout.name());
        assert_eq!(layout.tile(800, 600).len(), count, "{}", layout.name());
    }
}

#[test]
fn test_quad_800x600() {
    assert_eq!(
        ViewportLayout::Quad.tile(800, 600),
        vec![
            IntRect::new(0, 0, 400, 300),
            IntRect::new(400, 0, 800, 300),
            IntRect::new(0, 300, 400, 600),
            IntRect::new(400, 300, 800, 600),
        ]
    );
}

#[test]
fn test_three_way_layouts() {
    assert_eq!(
        ViewportLayout::Top1Bottom2.tile(800, 600),
        vec![
            IntRect::new(0, 0, 800, 300),
            IntRect::new(0, 300, 400, 600),
            IntRect::new(400, 300, 800, 600),
        ]
    );
    assert_eq!(
        ViewportLayout::Left2Right1.tile(800, 600),
        vec![
            IntRect::new(0, 0, 400, 300),
            IntRect::new(0, 300, 400, 600),
            IntRect::new(400, 0, 800, 600),
        ]
    );
}

#[test]
fn test_every_layout_tiles_exactly() {
    // Odd sizes check that no pixel row or column is lost
    for (w, h) in [(800, 600), (801, 599), (3, 1)] {
        for layout in ViewportLayout::ALL {
            let rects = layout.tile(w, h);
            if rects.is_empty() {
                continue;
            }
            let area: i64 = rects
                .iter()
                .map(|r| r.width() as i64 * r.height() as i64)
                .sum();
            assert_eq!(area, w as i64 * h as i64, "{} at {w}x{h}", layout.name());

            // Corners and both sides of every split line
            let xs = [0, w / 2 - 1, w / 2, w - 1];
            let ys = [0, h / 2 - 1, h / 2, h - 1];
            for &x in xs.iter().filter(|&&x| x >= 0) {
                for &y in ys.iter().filter(|&&y| y >= 0) {
                    let hits = rects.iter().filter(|r| r.contains(IVec2::new(x, y))).count();
                    assert_eq!(hits, 1, "{} pixel ({x},{y}) at {w}x{h}", layout.name());
                }
            }
        }
    }
}

// ============================================================================
// Manager
// ============================================================================

#[test]
fn test_set_layout_resizes_and_copies_camera() {
    let mut manager = ViewportManager::new(800, 600);
    assert_eq!(manager.viewports().len(), 1);
    let start = manager.current_camera().unwrap().position;

    manager.set_layout(ViewportLayout::Quad);
    assert_eq!(manager.viewports().len(), 4);
    for viewport in manager.viewports() {
        assert_eq!(viewport.camera.position, start);
    }
    assert_eq!(manager.viewports()[3].rect, IntRect::new(400, 300, 800, 600));

    manager.set_layout(ViewportLayout::Vertical);
    assert_eq!(manager.viewports().len(), 2);
    assert_eq!(
        manager.take_events().last(),
        Some(&EditorEvent::ViewportsChanged {
            layout: ViewportLayout::Vertical,
            count: 2
        })
    );
}

#[test]
fn test_resize_retiles() {
    let mut manager = ViewportManager::new(800, 600);
    manager.set_layout(ViewportLayout::Horizontal);
    manager.resize(1000, 400);
    assert_eq!(manager.viewports()[1].rect, IntRect::new(0, 200, 1000, 400));
    assert_eq!(manager.surface_size(), IVec2::new(1000, 400));
}

#[test]
fn test_hover_selects_active_viewport() {
    let mut manager = ViewportManager::new(800, 600);
    manager.set_layout(ViewportLayout::Quad);
    manager.take_events();
    let settings = CameraSettings::default();

    let mut input = InputState::new();
    input.mouse.set_position(500, 450);
    manager.update(&mut input, 0.016, &settings, None);
    assert_eq!(manager.active_index(), 3);
    assert_eq!(
        manager.take_events(),
        vec![EditorEvent::ActiveViewportChanged { index: 3 }]
    );
}

#[test]
fn test_held_button_keeps_active_viewport() {
    let mut manager = ViewportManager::new(800, 600);
    manager.set_layout(ViewportLayout::Vertical);
    let settings = CameraSettings::default();

    let mut input = InputState::new();
    input.mouse.set_position(100, 100);
    manager.update(&mut input, 0.016, &settings, None);
    assert_eq!(manager.active_index(), 0);

    input.handle_mouse_button(MouseButton::Right, true);
    input.mouse.set_position(700, 100);
    manager.update(&mut input, 0.016, &settings, None);
    assert_eq!(manager.active_index(), 0);

    input.handle_mouse_button(MouseButton::Right, false);
    manager.update(&mut input, 0.016, &settings, None);
    assert_eq!(manager.active_index(), 1);
}

#[test]
fn test_only_active_viewport_moves() {
    let mut manager = ViewportManager::new(800, 600);
    manager.set_layout(ViewportLayout::Vertical);
    let start = manager.viewports()[1].camera.position;

    let mut input = InputState::new();
    input.mouse.set_position(10, 10);
    input.handle_key(scene_editor_core::KeyCode::E, true);
    manager.update(&mut input, 1.0, &CameraSettings::default(), None);

    assert_eq!(manager.viewports()[1].camera.position, start);
    let moved = manager.viewports()[0].camera.position - start;
    assert!((moved - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-4);
}

#[test]
fn test_empty_layout_has_no_ray() {
    let mut manager = ViewportManager::new(800, 600);
    manager.set_layout(ViewportLayout::Empty);
    let mut input = InputState::new();
    manager.update(&mut input, 0.016, &CameraSettings::default(), None);
    assert!(manager.current_ray().is_none());
    assert!(manager.current_camera().is_none());
}

#[test]
fn test_center_ray_matches_camera_forward() {
    let mut manager = ViewportManager::new(800, 600);
    let mut input = InputState::new();
    input.mouse.set_position(400, 300);
    manager.update(&mut input, 0.016, &CameraSettings::default(), None);

    let camera = manager.current_camera().unwrap();
    let ray = manager.current_ray().unwrap();
    assert!((ray.direction - camera.forward()).length() < 1e-4);
    assert_eq!(ray.origin, camera.position);
}

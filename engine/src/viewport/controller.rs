//! Viewport Camera Controller
//!
//! Per-frame camera navigation for one viewport: keyboard fly-through, mouse
//! wheel dolly/zoom, framing the selection, and mouse look / pan / orbit.
//! Two key schemes are supported, selected by [`HotKeyMode`]:
//!
//! - **Standard**: WASD/arrows always move, right or middle button looks,
//!   middle button pans or orbits the selection.
//! - **Blender**: Shift+F toggles fly mode. Keys only move in fly mode,
//!   middle button (or fly mode) looks, Shift+middle pans. The right button
//!   or Escape leaves fly mode.
//!
//! Orbit keeps the camera at the distance it had from the selection center
//! when the middle button went down, so neither rounding nor keyboard motion
//! during the drag can make it creep.

use glam::{Quat, Vec3};

use super::camera::ViewportCamera;
use super::layout::IntRect;
use crate::config::{CameraSettings, HotKeyMode};
use crate::input::{KeyCode, MouseButton, MouseMode, SceneInput};

/// Pitch limit in degrees when rotation limiting is enabled.
pub const PITCH_LIMIT: f32 = 90.0;

/// Distance kept between the camera and the selection when framing it.
pub const FRAME_DISTANCE: f32 = 10.0;

/// Wheel dolly factor.
const WHEEL_DOLLY_SCALE: f32 = 20.0;
/// Wheel dolly factor for the distance-scaled Blender dolly.
const WHEEL_DISTANCE_DOLLY_SCALE: f32 = 40.0;
/// Distance at which the distance-scaled dolly reaches full speed.
const WHEEL_DISTANCE_FULL_SPEED: f32 = 40.0;
const WHEEL_ZOOM_STEP: f32 = 0.1;
const PAN_SCALE: f32 = 0.5;

/// Inputs to one [`Viewport::update`].
pub struct ViewportUpdateParams<'a> {
    pub time_step: f32,
    pub input: &'a mut dyn SceneInput,
    pub settings: &'a CameraSettings,
    /// Center of the current selection, `None` when nothing is selected.
    pub selection_center: Option<Vec3>,
}

/// One view into the scene: a camera, its screen rectangle and navigation state.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub camera: ViewportCamera,
    pub rect: IntRect,
    pub fly_mode: bool,
    pub orbiting: bool,
    /// Selection distance captured when the middle button went down. A
    /// selection made mid-drag is captured on its first orbit frame instead.
    pub orbit_distance: Option<f32>,
}

impl Viewport {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            camera: ViewportCamera::new(position, rotation),
            rect: IntRect::ZERO,
            fly_mode: false,
            orbiting: false,
            orbit_distance: None,
        }
    }

    pub fn set_transform(&mut self, position: Vec3, rotation: Quat) {
        self.camera.set_transform(position, rotation);
    }

    /// Advance navigation by one frame.
    pub fn update(&mut self, p: ViewportUpdateParams<'_>) {
        let Some(mode) = p.settings.hotkey_mode else {
            return;
        };
        let input = p.input;
        let s = p.settings;
        let dt = p.time_step;

        if mode == HotKeyMode::Blender
            && input.is_shift_down()
            && input.is_key_pressed(KeyCode::F)
        {
            self.fly_mode = !self.fly_mode;
        }

        if input.is_mouse_button_pressed(MouseButton::Middle) {
            if let Some(center) = p.selection_center {
                self.orbit_distance = Some((self.camera.position - center).length());
            }
        }

        let speed_multiplier = if input.is_shift_down() {
            s.shift_factor
        } else {
            1.0
        };

        self.update_keyboard_motion(&*input, mode, s, dt * speed_multiplier);

        let wheel = input.wheel_move();
        if wheel != 0 {
            self.update_wheel(&*input, mode, s, wheel as f32, dt, speed_multiplier, p.selection_center);
        }

        if input.is_key_down(KeyCode::Home) {
            if let Some(center) = p.selection_center {
                self.camera.position = center - self.camera.rotation * Vec3::new(0.0, 0.0, FRAME_DISTANCE);
            }
        }

        let look_button = match mode {
            HotKeyMode::Standard => {
                input.is_mouse_button_down(MouseButton::Right)
                    || input.is_mouse_button_down(MouseButton::Middle)
            }
            HotKeyMode::Blender => {
                let look = input.is_mouse_button_down(MouseButton::Middle) || self.fly_mode;
                if input.is_mouse_button_down(MouseButton::Right)
                    || input.is_key_down(KeyCode::Escape)
                {
                    self.fly_mode = false;
                }
                look
            }
        };

        if look_button {
            input.set_mouse_mode(MouseMode::Wrap);
            self.update_mouse_look(&*input, mode, s, dt, p.selection_center);
        } else {
            input.set_mouse_mode(MouseMode::Absolute);
        }

        if !input.is_mouse_button_down(MouseButton::Middle) {
            self.orbiting = false;
            self.orbit_distance = None;
        }
    }

    fn update_keyboard_motion(
        &mut self,
        input: &dyn SceneInput,
        mode: HotKeyMode,
        s: &CameraSettings,
        scaled_dt: f32,
    ) {
        if input.is_ctrl_down() || input.is_alt_down() {
            return;
        }
        let enabled = match mode {
            HotKeyMode::Standard => true,
            HotKeyMode::Blender => self.fly_mode && !input.is_shift_down(),
        };
        if !enabled {
            return;
        }

        let step = s.base_speed * scaled_dt;
        let down = |a: KeyCode, b: KeyCode| input.is_key_down(a) || input.is_key_down(b);

        if down(KeyCode::W, KeyCode::ArrowUp) {
            self.camera.translate_local(Vec3::new(0.0, 0.0, step));
        }
        if down(KeyCode::S, KeyCode::ArrowDown) {
            self.camera.translate_local(Vec3::new(0.0, 0.0, -step));
        }
        if down(KeyCode::A, KeyCode::ArrowLeft) {
            self.camera.translate_local(Vec3::new(-step, 0.0, 0.0));
        }
        if down(KeyCode::D, KeyCode::ArrowRight) {
            self.camera.translate_local(Vec3::new(step, 0.0, 0.0));
        }
        if down(KeyCode::E, KeyCode::PageUp) {
            self.camera.translate_world(Vec3::new(0.0, step, 0.0));
        }
        if down(KeyCode::Q, KeyCode::PageDown) {
            self.camera.translate_world(Vec3::new(0.0, -step, 0.0));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn update_wheel(
        &mut self,
        input: &dyn SceneInput,
        mode: HotKeyMode,
        s: &CameraSettings,
        wheel: f32,
        dt: f32,
        speed_multiplier: f32,
        selection_center: Option<Vec3>,
    ) {
        let dolly = s.base_speed * wheel * WHEEL_DOLLY_SCALE * dt * speed_multiplier;
        let zoom = |camera: &mut ViewportCamera| {
            camera.set_zoom(camera.zoom - wheel * WHEEL_ZOOM_STEP * speed_multiplier);
        };

        match mode {
            HotKeyMode::Standard => {
                if s.wheel_moves_camera {
                    self.camera.translate_local(Vec3::new(0.0, 0.0, dolly));
                } else {
                    zoom(&mut self.camera);
                }
            }
            HotKeyMode::Blender => {
                if input.is_shift_down() {
                    self.camera.translate_local(Vec3::new(0.0, dolly, 0.0));
                } else if input.is_ctrl_down() {
                    self.camera.translate_local(Vec3::new(dolly, 0.0, 0.0));
                } else if s.wheel_moves_camera && !self.camera.orthographic {
                    let center = selection_center.unwrap_or(Vec3::ZERO);
                    let distance = (self.camera.position - center).length();
                    let factor = (distance / WHEEL_DISTANCE_FULL_SPEED).min(1.0);
                    let step = s.base_speed
                        * wheel
                        * WHEEL_DISTANCE_DOLLY_SCALE
                        * factor
                        * dt
                        * speed_multiplier;
                    self.camera.translate_local(Vec3::new(0.0, 0.0, step));
                } else if input.is_alt_down() {
                    zoom(&mut self.camera);
                } else {
                    self.camera.translate_local(Vec3::new(0.0, 0.0, dolly));
                }
            }
        }
    }

    fn update_mouse_look(
        &mut self,
        input: &dyn SceneInput,
        mode: HotKeyMode,
        s: &CameraSettings,
        dt: f32,
        selection_center: Option<Vec3>,
    ) {
        let delta = input.mouse_move();
        if delta.x == 0 && delta.y == 0 {
            return;
        }
        let middle = input.is_mouse_button_down(MouseButton::Middle);

        let pan = match mode {
            HotKeyMode::Standard => middle && (s.mmb_pan != input.is_shift_down()),
            HotKeyMode::Blender => !self.fly_mode && input.is_shift_down(),
        };

        if pan {
            let step = dt * s.base_speed * PAN_SCALE;
            self.camera
                .translate_local(Vec3::new(-delta.x as f32, delta.y as f32, 0.0) * step);
            return;
        }

        let mut angles = self.camera.angles;
        angles.x += delta.y as f32 * s.rotation_speed;
        angles.y += delta.x as f32 * s.rotation_speed;
        if s.limit_rotation {
            angles.x = angles.x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        self.camera.set_angles(Vec3::new(angles.x, angles.y, 0.0));

        let (true, Some(center)) = (middle, selection_center) else {
            return;
        };
        let distance = *self
            .orbit_distance
            .get_or_insert_with(|| (self.camera.position - center).length());
        self.camera.position = center - self.camera.rotation * Vec3::new(0.0, 0.0, distance);
        self.orbiting = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;
    use glam::IVec2;

    const EPS: f32 = 1e-4;

    fn viewport() -> Viewport {
        Viewport::new(Vec3::ZERO, Quat::IDENTITY)
    }

    fn step(viewport: &mut Viewport, input: &mut InputState, settings: &CameraSettings, dt: f32) {
        viewport.update(ViewportUpdateParams {
            time_step: dt,
            input,
            settings,
            selection_center: None,
        });
    }

    fn blender() -> CameraSettings {
        CameraSettings {
            hotkey_mode: Some(HotKeyMode::Blender),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_mode_is_noop() {
        let mut vp = viewport();
        let mut input = InputState::new();
        input.handle_key(KeyCode::W, true);
        let settings = CameraSettings {
            hotkey_mode: None,
            ..Default::default()
        };
        step(&mut vp, &mut input, &settings, 1.0);
        assert_eq!(vp.camera.position, Vec3::ZERO);
        assert_eq!(input.take_mouse_mode_change(), None);
    }

    #[test]
    fn test_ctrl_blocks_keyboard_motion() {
        let mut vp = viewport();
        let mut input = InputState::new();
        input.handle_key(KeyCode::W, true);
        input.handle_key(KeyCode::ControlLeft, true);
        step(&mut vp, &mut input, &CameraSettings::default(), 1.0);
        assert_eq!(vp.camera.position, Vec3::ZERO);
    }

    #[test]
    fn test_vertical_keys_are_world_space() {
        let mut vp = viewport();
        vp.camera.set_angles(Vec3::new(45.0, 0.0, 0.0));
        let mut input = InputState::new();
        input.handle_key(KeyCode::E, true);
        step(&mut vp, &mut input, &CameraSettings::default(), 1.0);
        assert!((vp.camera.position - Vec3::new(0.0, 5.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_blender_keys_need_fly_mode() {
        let mut vp = viewport();
        let mut input = InputState::new();
        let settings = blender();
        input.handle_key(KeyCode::W, true);
        step(&mut vp, &mut input, &settings, 1.0);
        assert_eq!(vp.camera.position, Vec3::ZERO);

        vp.fly_mode = true;
        step(&mut vp, &mut input, &settings, 1.0);
        assert!((vp.camera.position.z - 5.0).abs() < EPS);
    }

    #[test]
    fn test_shift_f_toggles_fly_and_escape_exits() {
        let mut vp = viewport();
        let mut input = InputState::new();
        let settings = blender();

        input.handle_key(KeyCode::ShiftLeft, true);
        input.handle_key(KeyCode::F, true);
        step(&mut vp, &mut input, &settings, 0.016);
        assert!(vp.fly_mode);
        assert_eq!(input.take_mouse_mode_change(), Some(MouseMode::Wrap));

        input.end_frame();
        input.handle_key(KeyCode::Escape, true);
        step(&mut vp, &mut input, &settings, 0.016);
        assert!(!vp.fly_mode);
    }

    #[test]
    fn test_wheel_zoom_when_position_disabled() {
        let mut vp = viewport();
        let mut input = InputState::new();
        input.mouse.add_wheel(-5);
        let settings = CameraSettings {
            wheel_moves_camera: false,
            ..Default::default()
        };
        step(&mut vp, &mut input, &settings, 0.016);
        assert!((vp.camera.zoom - 1.5).abs() < EPS);
        assert_eq!(vp.camera.position, Vec3::ZERO);
    }

    #[test]
    fn test_wheel_dolly_standard() {
        let mut vp = viewport();
        let mut input = InputState::new();
        input.mouse.add_wheel(1);
        step(&mut vp, &mut input, &CameraSettings::default(), 0.1);
        // 5 * 1 * 20 * 0.1
        assert!((vp.camera.position.z - 10.0).abs() < EPS);
    }

    #[test]
    fn test_blender_wheel_scales_with_distance() {
        let mut vp = Viewport::new(Vec3::new(0.0, 0.0, -20.0), Quat::IDENTITY);
        let mut input = InputState::new();
        input.mouse.add_wheel(1);
        let settings = blender();
        vp.update(ViewportUpdateParams {
            time_step: 0.1,
            input: &mut input,
            settings: &settings,
            selection_center: Some(Vec3::ZERO),
        });
        // 5 * 1 * 40 * (20 / 40) * 0.1
        assert!((vp.camera.position.z + 10.0).abs() < EPS);
    }

    #[test]
    fn test_home_frames_selection() {
        let mut vp = viewport();
        let mut input = InputState::new();
        input.handle_key(KeyCode::Home, true);
        vp.update(ViewportUpdateParams {
            time_step: 0.016,
            input: &mut input,
            settings: &CameraSettings::default(),
            selection_center: Some(Vec3::new(1.0, 2.0, 3.0)),
        });
        assert!((vp.camera.position - Vec3::new(1.0, 2.0, -7.0)).length() < EPS);
    }

    #[test]
    fn test_standard_middle_drag_pans() {
        let mut vp = viewport();
        let mut input = InputState::new();
        input.handle_mouse_button(MouseButton::Middle, true);
        input.mouse.add_motion(2, 4);
        step(&mut vp, &mut input, &CameraSettings::default(), 1.0);
        // (-dx, dy, 0) * dt * base * 0.5
        assert!((vp.camera.position - Vec3::new(-5.0, 10.0, 0.0)).length() < EPS);
        assert_eq!(vp.camera.angles, Vec3::ZERO);
    }

    #[test]
    fn test_right_drag_rotates() {
        let mut vp = viewport();
        let mut input = InputState::new();
        input.handle_mouse_button(MouseButton::Right, true);
        input.mouse.add_motion(10, -5);
        step(&mut vp, &mut input, &CameraSettings::default(), 0.016);
        assert!((vp.camera.angles - Vec3::new(-1.0, 2.0, 0.0)).length() < EPS);
        assert_eq!(input.mouse_move(), IVec2::new(10, -5));
    }

    #[test]
    fn test_release_resets_orbit_state() {
        let mut vp = viewport();
        vp.orbiting = true;
        vp.orbit_distance = Some(3.0);
        let mut input = InputState::new();
        step(&mut vp, &mut input, &CameraSettings::default(), 0.016);
        assert!(!vp.orbiting);
        assert_eq!(vp.orbit_distance, None);
        assert_eq!(input.take_mouse_mode_change(), None);
    }
}

//! Scene Editor - host binary
//!
//! Opens a window, feeds winit input into the editor core and drives one
//! `SceneDocument` per frame. Nothing is rendered; camera movement, layout
//! changes and history operations are reported through the log.
//!
//! Run with: `RUST_LOG=debug cargo run --bin scene_editor`
//!
//! Controls:
//! - W/A/S/D, Q/E: Move camera (Standard mode, or Blender fly mode)
//! - Shift: Faster movement
//! - Right mouse drag: Rotate camera
//! - Middle mouse drag: Pan, or orbit around the selection
//! - Mouse wheel: Zoom or dolly
//! - Left click: Select the node under the cursor (per the pick mode setting)
//! - Home: Frame the selection
//! - Shift+F: Toggle fly mode (Blender mode), Escape leaves it
//! - F1-F9: Viewport layouts
//! - Ctrl+Z: Undo
//! - Ctrl+Y: Redo
//! - Ctrl+O: Print the options dialog
//! - Close the window to exit; settings are saved on exit

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use env_logger::Env;
use glam::Vec3;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowAttributes, WindowId};

use scene_editor_core::config::{Configuration, register_scene_editor_variables};
use scene_editor_core::editor::{
    AbstractAction, DialogLocationHint, GenericMainWindow, GenericMenu, HeadlessHierarchyList,
    HeadlessMainWindow, HierarchyWindow, KeyBinding, OptionsModel, SceneDocument,
};
use scene_editor_core::events::EditorEvent;
use scene_editor_core::input::{InputState, KeyCode, MouseButton, MouseMode, SceneInput};
use scene_editor_core::viewport::ViewportLayout;

const SETTINGS_FILE: &str = "scene_editor_settings.json";
const INITIAL_SIZE: (u32, u32) = (1280, 800);

const ACTION_UNDO: &str = "Edit.Undo";
const ACTION_REDO: &str = "Edit.Redo";
const ACTION_OPTIONS: &str = "Tools.Options";
const LAYOUT_ACTION_PREFIX: &str = "View.Layout.";

const LAYOUT_KEYS: [KeyCode; 9] = [
    KeyCode::F1,
    KeyCode::F2,
    KeyCode::F3,
    KeyCode::F4,
    KeyCode::F5,
    KeyCode::F6,
    KeyCode::F7,
    KeyCode::F8,
    KeyCode::F9,
];

// ============================================================================
// INPUT MAPPING
// ============================================================================

fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyB => KeyCode::B,
        WinitKey::KeyC => KeyCode::C,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyF => KeyCode::F,
        WinitKey::KeyG => KeyCode::G,
        WinitKey::KeyH => KeyCode::H,
        WinitKey::KeyI => KeyCode::I,
        WinitKey::KeyJ => KeyCode::J,
        WinitKey::KeyK => KeyCode::K,
        WinitKey::KeyL => KeyCode::L,
        WinitKey::KeyM => KeyCode::M,
        WinitKey::KeyN => KeyCode::N,
        WinitKey::KeyO => KeyCode::O,
        WinitKey::KeyP => KeyCode::P,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyT => KeyCode::T,
        WinitKey::KeyU => KeyCode::U,
        WinitKey::KeyV => KeyCode::V,
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyX => KeyCode::X,
        WinitKey::KeyY => KeyCode::Y,
        WinitKey::KeyZ => KeyCode::Z,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::F1 => KeyCode::F1,
        WinitKey::F2 => KeyCode::F2,
        WinitKey::F3 => KeyCode::F3,
        WinitKey::F4 => KeyCode::F4,
        WinitKey::F5 => KeyCode::F5,
        WinitKey::F6 => KeyCode::F6,
        WinitKey::F7 => KeyCode::F7,
        WinitKey::F8 => KeyCode::F8,
        WinitKey::F9 => KeyCode::F9,
        WinitKey::F10 => KeyCode::F10,
        WinitKey::F11 => KeyCode::F11,
        WinitKey::F12 => KeyCode::F12,
        WinitKey::Home => KeyCode::Home,
        WinitKey::End => KeyCode::End,
        WinitKey::PageUp => KeyCode::PageUp,
        WinitKey::PageDown => KeyCode::PageDown,
        WinitKey::Insert => KeyCode::Insert,
        WinitKey::Delete => KeyCode::Delete,
        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::ControlLeft => KeyCode::ControlLeft,
        WinitKey::ControlRight => KeyCode::ControlRight,
        WinitKey::AltLeft => KeyCode::AltLeft,
        WinitKey::AltRight => KeyCode::AltRight,
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::Enter => KeyCode::Enter,
        WinitKey::Tab => KeyCode::Tab,
        WinitKey::Space => KeyCode::Space,
        WinitKey::Backspace => KeyCode::Backspace,
        _ => KeyCode::Unknown,
    }
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(4),
        winit::event::MouseButton::Forward => MouseButton::Other(5),
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    }
}

fn layout_action_id(layout: ViewportLayout) -> String {
    format!("{LAYOUT_ACTION_PREFIX}{}", layout.name())
}

// ============================================================================
// APPLICATION
// ============================================================================

struct SceneEditorApp {
    window: Option<Arc<Window>>,
    settings_path: PathBuf,
    config: Configuration,
    document: SceneDocument,
    input: InputState,
    main_window: HeadlessMainWindow,
    hierarchy: HierarchyWindow<HeadlessHierarchyList>,
    last_frame: Instant,
}

impl SceneEditorApp {
    fn new(settings_path: PathBuf) -> Self {
        let mut config = Configuration::new();
        register_scene_editor_variables(&mut config);
        match config.load_from_path(&settings_path) {
            Ok(count) => info!("Loaded {count} setting(s) from {}", settings_path.display()),
            Err(e) => warn!("Ignoring settings file {}: {e}", settings_path.display()),
        }

        let (width, height) = INITIAL_SIZE;
        let mut document = SceneDocument::new(width as i32, height as i32);
        populate_demo_scene(&mut document);

        let mut hierarchy = HierarchyWindow::new(HeadlessHierarchyList::new());
        hierarchy.set_scene(document.scene());
        hierarchy.set_selection(document.selection());
        // Rows were built from the final scene state
        document.take_events();

        let mut main_window = HeadlessMainWindow::new();
        register_actions(&mut main_window);
        main_window.add_dialog("Hierarchy", DialogLocationHint::DockLeft);

        Self {
            window: None,
            settings_path,
            config,
            document,
            // No widgets are drawn, so ui_focused/ui_hovered stay false
            input: InputState::new(),
            main_window,
            hierarchy,
            last_frame: Instant::now(),
        }
    }

    fn save_settings(&self) {
        match self.config.save_to_path(&self.settings_path) {
            Ok(()) => info!("Saved settings to {}", self.settings_path.display()),
            Err(e) => error!("Failed to save settings to {}: {e}", self.settings_path.display()),
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        self.input.handle_key(key, pressed);
        if pressed && !repeat {
            let modifiers = self.input.keyboard.modifiers();
            self.main_window.press_key(key, modifiers);
        }
    }

    fn run_actions(&mut self) {
        for id in self.main_window.take_triggered_actions() {
            match id.as_str() {
                ACTION_UNDO => {
                    if !self.document.undo() {
                        debug!("Nothing to undo");
                    }
                }
                ACTION_REDO => {
                    if !self.document.redo() {
                        debug!("Nothing to redo");
                    }
                }
                ACTION_OPTIONS => {
                    let model = OptionsModel::from_config(&self.config);
                    info!("Options:\n{}", model.describe());
                }
                other => {
                    let layout = other
                        .strip_prefix(LAYOUT_ACTION_PREFIX)
                        .and_then(|name| ViewportLayout::ALL.into_iter().find(|l| l.name() == name));
                    match layout {
                        Some(layout) => self.document.set_layout(layout),
                        None => warn!("Unhandled action '{other}'"),
                    }
                }
            }
        }
    }

    fn apply_mouse_mode(&mut self) {
        let Some(mode) = self.input.take_mouse_mode_change() else {
            return;
        };
        let Some(window) = &self.window else {
            return;
        };
        match mode {
            MouseMode::Wrap => {
                if window.set_cursor_grab(CursorGrabMode::Locked).is_err() {
                    let _ = window.set_cursor_grab(CursorGrabMode::Confined);
                }
                window.set_cursor_visible(false);
            }
            MouseMode::Absolute => {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
            }
        }
    }

    fn process_events(&mut self) {
        for event in self.document.take_events() {
            match event {
                EditorEvent::Scene(scene_event) => {
                    self.hierarchy.handle_scene_event(self.document.scene(), &scene_event);
                }
                EditorEvent::SelectionChanged => {
                    self.hierarchy.set_selection(self.document.selection());
                }
                EditorEvent::ViewportsChanged { layout, count } => {
                    info!("Layout {} ({count} viewport(s))", layout.name());
                    if let Some(window) = &self.window {
                        window.set_title(&format!("Scene Editor - {}", layout.name()));
                    }
                }
                other => debug!("{other:?}"),
            }
        }

        if let Some(nodes) = self.hierarchy.poll_selection() {
            self.document.set_selection(nodes);
        }
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.run_actions();
        self.document.update(&mut self.input, dt, &self.config);
        if self.input.is_mouse_button_pressed(MouseButton::Left) && !self.input.is_ui_hovered() {
            self.document.pick(&self.config);
        }
        self.apply_mouse_mode();
        self.process_events();
        self.input.end_frame();
    }
}

fn register_actions(window: &mut HeadlessMainWindow) {
    window.add_action(AbstractAction::new(ACTION_UNDO, "Undo").with_key(KeyBinding::ctrl(KeyCode::Z)));
    window.add_action(AbstractAction::new(ACTION_REDO, "Redo").with_key(KeyBinding::ctrl(KeyCode::Y)));
    window.add_action(
        AbstractAction::new(ACTION_OPTIONS, "Options...").with_key(KeyBinding::ctrl(KeyCode::O)),
    );

    let edit = window.add_menu("Edit");
    edit.add_action(ACTION_UNDO);
    edit.add_action(ACTION_REDO);
    window.add_menu("Tools").add_action(ACTION_OPTIONS);

    for (layout, key) in ViewportLayout::ALL.into_iter().zip(LAYOUT_KEYS) {
        let id = layout_action_id(layout);
        window.add_action(AbstractAction::new(&id, layout.name()).with_key(KeyBinding::key(key)));
        window.add_menu("View").add_menu("Layout").add_action(&id);
    }
}

fn populate_demo_scene(document: &mut SceneDocument) {
    let scene = document.scene_mut();
    let root = scene.root();
    if let Some(ground) = scene.create_node(root, "Ground") {
        scene.add_component(ground, "StaticModel");
        scene.set_scale(ground, Vec3::new(20.0, 1.0, 20.0));
    }
    if let Some(light) = scene.create_node(root, "Light") {
        scene.add_component(light, "Light");
        scene.set_position(light, Vec3::new(0.0, 8.0, 0.0));
    }
    if let Some(target) = scene.create_node(root, "Target") {
        scene.add_component(target, "StaticModel");
        scene.set_position(target, Vec3::new(0.0, 1.0, 5.0));
        document.set_selection([target]);
    }
}

impl ApplicationHandler for SceneEditorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let (width, height) = INITIAL_SIZE;
        let attrs = WindowAttributes::default()
            .with_title("Scene Editor")
            .with_inner_size(PhysicalSize::new(width, height));
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                self.document.resize(size.width as i32, size.height as i32);
                self.window = Some(Arc::new(window));
                self.last_frame = Instant::now();
                info!("Window created ({}x{})", size.width, size.height);
            }
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.save_settings();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    self.handle_key(map_key(key), pressed, event.repeat);
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.input
                    .handle_mouse_button(map_button(button), state == ElementState::Pressed);
            }

            // Relative motion comes from DeviceEvent while the cursor is captured
            WindowEvent::CursorMoved { position, .. } => {
                if self.input.cursor.mode() == MouseMode::Absolute {
                    self.input.mouse.set_position(position.x as i32, position.y as i32);
                }
            }

            WindowEvent::CursorEntered { .. } => self.input.mouse.enter_window(),
            WindowEvent::CursorLeft { .. } => self.input.mouse.leave_window(),

            WindowEvent::MouseWheel { delta, .. } => {
                let ticks = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.input.mouse.add_wheel(ticks.round() as i32);
            }

            WindowEvent::Focused(focused) => self.input.handle_focus_change(focused),

            WindowEvent::Resized(new_size) => {
                self.document
                    .resize(new_size.width as i32, new_size.height as i32);
            }

            WindowEvent::RedrawRequested => self.frame(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn device_event(&mut self, _: &ActiveEventLoop, _: DeviceId, event: DeviceEvent) {
        if self.input.cursor.mode() != MouseMode::Wrap {
            return;
        }
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.mouse.add_raw_motion(delta.0, delta.1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Scene Editor starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = SceneEditorApp::new(PathBuf::from(SETTINGS_FILE));
    event_loop.run_app(&mut app)?;
    Ok(())
}

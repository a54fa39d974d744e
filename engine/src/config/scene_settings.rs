//! Scene editor settings
//!
//! Keys, defaults and typed snapshots for the camera, gizmo snapping and
//! picking variables.

use super::Configuration;

// ============================================================================
// KEYS
// ============================================================================

pub const VAR_HOTKEY_MODE: &str = "scene.camera/hotkey";
pub const VAR_CAMERA_BASE_SPEED: &str = "scene.camera/speedbase";
pub const VAR_CAMERA_SHIFT_FACTOR: &str = "scene.camera/shiftfactor";
pub const VAR_CAMERA_ROTATION_SPEED: &str = "scene.camera/speedrotation";
pub const VAR_WHEEL_CAMERA_POSITION: &str = "scene.camera/wheelposition";
pub const VAR_MMB_PAN: &str = "scene.camera/mmbpan";
pub const VAR_LIMIT_ROTATION: &str = "scene.camera/limitrot";

pub const VAR_SNAP_FACTOR: &str = "scene.gizmo/snap.factor";
pub const VAR_SNAP_POSITION: &str = "scene.gizmo/snap.position";
pub const VAR_SNAP_ROTATION: &str = "scene.gizmo/snap.rotation";
pub const VAR_SNAP_SCALE: &str = "scene.gizmo/snap.scale";
pub const VAR_SNAP_POSITION_STEP: &str = "scene.gizmo/step.position";
pub const VAR_SNAP_ROTATION_STEP: &str = "scene.gizmo/step.rotation";
pub const VAR_SNAP_SCALE_STEP: &str = "scene.gizmo/step.scale";

pub const VAR_PICK_MODE: &str = "scene.select/pickmode";

const SECTION_CAMERA: &str = "Scene.Camera";
const SECTION_GIZMO: &str = "Scene.Gizmo";
const SECTION_SELECT: &str = "Scene.Select";

// ============================================================================
// ENUMS
// ============================================================================

/// Camera key scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HotKeyMode {
    #[default]
    Standard = 0,
    Blender = 1,
}

impl HotKeyMode {
    pub const NAMES: [&'static str; 2] = ["Standard", "Blender"];

    /// Map a stored integer to a mode. Unknown values yield `None`.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(HotKeyMode::Standard),
            1 => Some(HotKeyMode::Blender),
            _ => None,
        }
    }
}

/// Component types picked in [`PickMode::Geometries`].
const GEOMETRY_TYPES: [&str; 11] = [
    "StaticModel",
    "StaticModelGroup",
    "AnimatedModel",
    "BillboardSet",
    "ParticleEmitter",
    "RibbonTrail",
    "CustomGeometry",
    "DecalSet",
    "Skybox",
    "Terrain",
    "Text3D",
];

/// What a viewport click picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickMode {
    #[default]
    Geometries = 0,
    Lights = 1,
    Zones = 2,
    Rigidbodies = 3,
}

impl PickMode {
    pub const NAMES: [&'static str; 4] = ["Geometries", "Lights", "Zones", "Rigidbodies"];

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(PickMode::Geometries),
            1 => Some(PickMode::Lights),
            2 => Some(PickMode::Zones),
            3 => Some(PickMode::Rigidbodies),
            _ => None,
        }
    }

    /// Stored pick mode. Unknown values fall back to geometries.
    pub fn from_config(config: &Configuration) -> Self {
        Self::from_index(config.get_int(VAR_PICK_MODE, 0)).unwrap_or_default()
    }

    /// Whether a component of this type makes its node pickable.
    pub fn matches(self, type_name: &str) -> bool {
        match self {
            PickMode::Geometries => GEOMETRY_TYPES.contains(&type_name),
            PickMode::Lights => type_name == "Light",
            PickMode::Zones => type_name == "Zone",
            PickMode::Rigidbodies => type_name == "RigidBody",
        }
    }
}

fn names(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

/// Register every scene editor variable with its default.
pub fn register_scene_editor_variables(config: &mut Configuration) {
    config.register_variable(
        VAR_HOTKEY_MODE,
        HotKeyMode::Standard as i64,
        SECTION_CAMERA,
        "HotKey Mode",
        names(&HotKeyMode::NAMES),
    );
    config.register_variable(VAR_CAMERA_BASE_SPEED, 5.0, SECTION_CAMERA, "Camera Speed", None);
    config.register_variable(
        VAR_CAMERA_SHIFT_FACTOR,
        5.0,
        SECTION_CAMERA,
        "Shift Speed Multiplier",
        None,
    );
    config.register_variable(VAR_CAMERA_ROTATION_SPEED, 0.2, SECTION_CAMERA, "Rotation Speed", None);
    config.register_variable(
        VAR_WHEEL_CAMERA_POSITION,
        true,
        SECTION_CAMERA,
        "Mouse Wheel controls Camera Position",
        None,
    );
    config.register_variable(
        VAR_MMB_PAN,
        true,
        SECTION_CAMERA,
        "Mouse Middle Button makes Camera pan",
        None,
    );
    config.register_variable(VAR_LIMIT_ROTATION, true, SECTION_CAMERA, "Limit Camera Rotation", None);

    config.register_variable(VAR_SNAP_FACTOR, 1.0, SECTION_GIZMO, "Snap Factor", None);
    config.register_variable(VAR_SNAP_POSITION, false, SECTION_GIZMO, "Snap Position", None);
    config.register_variable(VAR_SNAP_ROTATION, false, SECTION_GIZMO, "Snap Rotation", None);
    config.register_variable(VAR_SNAP_SCALE, false, SECTION_GIZMO, "Snap Scale", None);
    config.register_variable(VAR_SNAP_POSITION_STEP, 0.5, SECTION_GIZMO, "Position Step", None);
    config.register_variable(VAR_SNAP_ROTATION_STEP, 5.0, SECTION_GIZMO, "Rotation Step", None);
    config.register_variable(VAR_SNAP_SCALE_STEP, 1.0, SECTION_GIZMO, "Scale Step", None);

    config.register_variable(
        VAR_PICK_MODE,
        PickMode::Geometries as i64,
        SECTION_SELECT,
        "Pick Mode",
        names(&PickMode::NAMES),
    );
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

/// Camera settings read once per update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// `None` when the stored integer is not a known mode.
    pub hotkey_mode: Option<HotKeyMode>,
    pub base_speed: f32,
    pub shift_factor: f32,
    pub rotation_speed: f32,
    pub wheel_moves_camera: bool,
    pub mmb_pan: bool,
    pub limit_rotation: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            hotkey_mode: Some(HotKeyMode::Standard),
            base_speed: 5.0,
            shift_factor: 5.0,
            rotation_speed: 0.2,
            wheel_moves_camera: true,
            mmb_pan: true,
            limit_rotation: true,
        }
    }
}

impl CameraSettings {
    pub fn from_config(config: &Configuration) -> Self {
        let d = Self::default();
        Self {
            hotkey_mode: HotKeyMode::from_index(config.get_int(VAR_HOTKEY_MODE, 0)),
            base_speed: config.get_float(VAR_CAMERA_BASE_SPEED, d.base_speed as f64) as f32,
            shift_factor: config.get_float(VAR_CAMERA_SHIFT_FACTOR, d.shift_factor as f64) as f32,
            rotation_speed: config.get_float(VAR_CAMERA_ROTATION_SPEED, d.rotation_speed as f64)
                as f32,
            wheel_moves_camera: config.get_bool(VAR_WHEEL_CAMERA_POSITION, d.wheel_moves_camera),
            mmb_pan: config.get_bool(VAR_MMB_PAN, d.mmb_pan),
            limit_rotation: config.get_bool(VAR_LIMIT_ROTATION, d.limit_rotation),
        }
    }
}

/// Gizmo snapping settings. A step of zero means no snapping on that channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSettings {
    pub position_step: f32,
    pub rotation_step: f32,
    pub scale_step: f32,
}

impl SnapSettings {
    /// Effective steps: enabled channels get `step * factor`, others zero.
    pub fn from_config(config: &Configuration) -> Self {
        let factor = config.get_float(VAR_SNAP_FACTOR, 1.0) as f32;
        let step = |enabled: &str, step: &str, fallback: f64| {
            if config.get_bool(enabled, false) {
                config.get_float(step, fallback) as f32 * factor
            } else {
                0.0
            }
        };
        Self {
            position_step: step(VAR_SNAP_POSITION, VAR_SNAP_POSITION_STEP, 0.5),
            rotation_step: step(VAR_SNAP_ROTATION, VAR_SNAP_ROTATION_STEP, 5.0),
            scale_step: step(VAR_SNAP_SCALE, VAR_SNAP_SCALE_STEP, 1.0),
        }
    }
}

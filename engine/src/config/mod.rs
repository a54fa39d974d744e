//! Configuration Module
//!
//! Registry of named, typed, defaulted editor settings. Variables are
//! registered with a section and display text so the options dialog can be
//! generated from the registry. Values resolve in order: value set this
//! session, value loaded from the settings file, registered default.
//!
//! The registry is an explicit value handed to whoever needs it; there is no
//! process-wide instance.

pub mod scene_settings;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub use scene_settings::{
    CameraSettings, HotKeyMode, PickMode, SnapSettings, register_scene_editor_variables,
};

/// Section used for variables registered without one.
pub const DEFAULT_SECTION: &str = "(Internal)";

// ============================================================================
// VALUES
// ============================================================================

/// A typed setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    String(String),
    StringList(Vec<String>),
}

impl ConfigValue {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::UInt(_) => "uint",
            ConfigValue::Double(_) => "double",
            ConfigValue::String(_) => "string",
            ConfigValue::StringList(_) => "string list",
        }
    }

    /// Whether both values are the same variant.
    pub fn same_kind(&self, other: &ConfigValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Lenient boolean view. Numbers are true when non-zero.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::Int(i) => Some(*i != 0),
            ConfigValue::UInt(u) => Some(*u != 0),
            ConfigValue::Double(d) => Some(*d != 0.0),
            ConfigValue::String(s) => s.parse().ok(),
            ConfigValue::StringList(_) => None,
        }
    }

    /// Lenient integer view. Doubles truncate toward zero.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Bool(b) => Some(*b as i64),
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::UInt(u) => i64::try_from(*u).ok(),
            ConfigValue::Double(d) => Some(*d as i64),
            ConfigValue::String(s) => s.trim().parse().ok(),
            ConfigValue::StringList(_) => None,
        }
    }

    /// Lenient floating point view.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            ConfigValue::Int(i) => Some(*i as f64),
            ConfigValue::UInt(u) => Some(*u as f64),
            ConfigValue::Double(d) => Some(*d),
            ConfigValue::String(s) => s.trim().parse().ok(),
            ConfigValue::StringList(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::StringList(list) => Some(list),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Double(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::String(v.to_string())
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(v: Vec<String>) -> Self {
        ConfigValue::StringList(v)
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors raised by the settings registry.
#[derive(Debug)]
pub enum ConfigError {
    /// A value of the wrong variant was assigned to a registered variable.
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Settings file could not be read or written.
    IoError(std::io::Error),
    /// Settings file is not valid JSON for the expected layout.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::TypeMismatch {
                key,
                expected,
                found,
            } => write!(f, "setting '{key}' expects {expected}, got {found}"),
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
            ConfigError::TypeMismatch { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Description of one registered variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDesc {
    pub key: String,
    pub default: ConfigValue,
    pub section: String,
    pub display_text: String,
    /// Item names when an integer variable is an enumeration.
    pub decoration: Option<Vec<String>>,
}

impl VariableDesc {
    /// Display text, falling back to the key.
    pub fn label(&self) -> &str {
        if self.display_text.is_empty() {
            &self.key
        } else {
            &self.display_text
        }
    }
}

/// Persisted file layout: key -> value.
type SettingsFile = BTreeMap<String, ConfigValue>;

/// Registry of typed editor settings.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    variables: Vec<VariableDesc>,
    index: HashMap<String, usize>,
    values: HashMap<String, ConfigValue>,
    persisted: HashMap<String, ConfigValue>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable. Re-registering a key replaces its description.
    pub fn register_variable(
        &mut self,
        key: &str,
        default: impl Into<ConfigValue>,
        section: &str,
        display_text: &str,
        decoration: Option<Vec<String>>,
    ) {
        let section = if section.is_empty() {
            DEFAULT_SECTION
        } else {
            section
        };
        let desc = VariableDesc {
            key: key.to_string(),
            default: default.into(),
            section: section.to_string(),
            display_text: display_text.to_string(),
            decoration,
        };
        match self.index.get(key) {
            Some(&i) => self.variables[i] = desc,
            None => {
                self.index.insert(key.to_string(), self.variables.len());
                self.variables.push(desc);
            }
        }
    }

    /// Description of a registered variable.
    pub fn variable(&self, key: &str) -> Option<&VariableDesc> {
        self.index.get(key).map(|&i| &self.variables[i])
    }

    /// All registered variables in registration order.
    pub fn variables(&self) -> &[VariableDesc] {
        &self.variables
    }

    /// Registered variables grouped by section (sections in name order).
    pub fn sections(&self) -> BTreeMap<&str, Vec<&VariableDesc>> {
        let mut sections: BTreeMap<&str, Vec<&VariableDesc>> = BTreeMap::new();
        for desc in &self.variables {
            sections.entry(desc.section.as_str()).or_default().push(desc);
        }
        sections
    }

    pub fn default_value(&self, key: &str) -> Option<&ConfigValue> {
        self.variable(key).map(|d| &d.default)
    }

    /// Current value: session value, then persisted value, then default.
    pub fn value(&self, key: &str) -> Option<&ConfigValue> {
        self.values
            .get(key)
            .or_else(|| self.persisted.get(key))
            .or_else(|| self.default_value(key))
    }

    /// Assign a value. Registered variables only accept their own variant.
    pub fn set_value(&mut self, key: &str, value: ConfigValue) -> Result<(), ConfigError> {
        if let Some(desc) = self.variable(key) {
            if !desc.default.same_kind(&value) {
                return Err(ConfigError::TypeMismatch {
                    key: key.to_string(),
                    expected: desc.default.type_name(),
                    found: value.type_name(),
                });
            }
        }
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    /// Drop the session and persisted value so the default applies again.
    pub fn reset_value(&mut self, key: &str) {
        self.values.remove(key);
        self.persisted.remove(key);
    }

    pub fn get_bool(&self, key: &str, fallback: bool) -> bool {
        self.typed(key, ConfigValue::as_bool).unwrap_or(fallback)
    }

    pub fn get_int(&self, key: &str, fallback: i64) -> i64 {
        self.typed(key, ConfigValue::as_int).unwrap_or(fallback)
    }

    pub fn get_float(&self, key: &str, fallback: f64) -> f64 {
        self.typed(key, ConfigValue::as_float).unwrap_or(fallback)
    }

    fn typed<T>(&self, key: &str, view: impl Fn(&ConfigValue) -> Option<T>) -> Option<T> {
        match self.value(key) {
            Some(value) => {
                let converted = view(value);
                if converted.is_none() {
                    warn!("config: '{key}' holds {} which cannot be converted", value.type_name());
                }
                converted
            }
            None => {
                warn!("config: unknown key '{key}'");
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    /// Serialize every non-default value to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let mut file = SettingsFile::new();
        for (key, value) in self.persisted.iter().chain(self.values.iter()) {
            file.insert(key.clone(), value.clone());
        }
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Load persisted values from JSON. Values whose variant does not match
    /// the registered default are skipped with a warning.
    pub fn load_json(&mut self, json: &str) -> Result<usize, ConfigError> {
        let file: SettingsFile = serde_json::from_str(json)?;
        let mut loaded = 0;
        for (key, value) in file {
            if let Some(desc) = self.variable(&key) {
                if !desc.default.same_kind(&value) {
                    warn!(
                        "config: ignoring stored '{key}': expected {}, found {}",
                        desc.default.type_name(),
                        value.type_name()
                    );
                    continue;
                }
            }
            self.persisted.insert(key, value);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Load a settings file. A missing file is not an error and loads nothing.
    pub fn load_from_path(&mut self, path: &Path) -> Result<usize, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("config: no settings file at {}", path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        self.load_json(&json)
    }

    /// Write all non-default values to a settings file.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

//! Options dialog model
//!
//! Toolkit-independent state of the options dialog, generated by reflecting
//! over the variables registered in a [`Configuration`]. Each variable gets
//! an edit buffer whose kind follows the variable's default value; buffers
//! are written back only on Apply/OK.

use log::warn;

use crate::config::{ConfigError, ConfigValue, Configuration, VariableDesc};

/// Editor widget used for a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Checkbox,
    /// Combo box over the decoration item names.
    Enum(Vec<String>),
    SignedInteger,
    UnsignedInteger,
    Double,
    Text,
    /// One list entry per line.
    MultilineText,
}

impl FieldKind {
    fn for_variable(desc: &VariableDesc) -> Self {
        match (&desc.default, &desc.decoration) {
            (ConfigValue::Bool(_), _) => FieldKind::Checkbox,
            (ConfigValue::Int(_) | ConfigValue::UInt(_), Some(items)) => FieldKind::Enum(items.clone()),
            (ConfigValue::Int(_), None) => FieldKind::SignedInteger,
            (ConfigValue::UInt(_), None) => FieldKind::UnsignedInteger,
            (ConfigValue::Double(_), _) => FieldKind::Double,
            (ConfigValue::String(_), _) => FieldKind::Text,
            (ConfigValue::StringList(_), _) => FieldKind::MultilineText,
        }
    }
}

/// Edit buffer contents.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldBuffer {
    Checked(bool),
    Index(i64),
    Text(String),
}

/// Dialog buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsButton {
    ResetAll,
    ResetThese,
    Cancel,
    Apply,
    Ok,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsField {
    pub key: String,
    pub display_text: String,
    pub kind: FieldKind,
    pub buffer: FieldBuffer,
    default: ConfigValue,
}

impl OptionsField {
    fn new(desc: &VariableDesc, current: &ConfigValue) -> Self {
        let kind = FieldKind::for_variable(desc);
        Self {
            key: desc.key.clone(),
            display_text: desc.label().to_string(),
            buffer: buffer_for(&kind, current),
            kind,
            default: desc.default.clone(),
        }
    }

    fn reset(&mut self) {
        self.buffer = buffer_for(&self.kind, &self.default);
    }

    /// Parse the buffer back into a value of the variable's type.
    fn parse(&self) -> Option<ConfigValue> {
        match (&self.default, &self.buffer) {
            (ConfigValue::Bool(_), FieldBuffer::Checked(b)) => Some(ConfigValue::Bool(*b)),
            (ConfigValue::Int(_), FieldBuffer::Index(i)) => Some(ConfigValue::Int(*i)),
            (ConfigValue::UInt(_), FieldBuffer::Index(i)) => u64::try_from(*i).ok().map(ConfigValue::UInt),
            (ConfigValue::Int(_), FieldBuffer::Text(t)) => t.trim().parse().ok().map(ConfigValue::Int),
            (ConfigValue::UInt(_), FieldBuffer::Text(t)) => t.trim().parse().ok().map(ConfigValue::UInt),
            (ConfigValue::Double(_), FieldBuffer::Text(t)) => t.trim().parse().ok().map(ConfigValue::Double),
            (ConfigValue::String(_), FieldBuffer::Text(t)) => Some(ConfigValue::String(t.clone())),
            (ConfigValue::StringList(_), FieldBuffer::Text(t)) => Some(ConfigValue::StringList(
                t.split(['\r', '\n'])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )),
            _ => None,
        }
    }
}

fn buffer_for(kind: &FieldKind, value: &ConfigValue) -> FieldBuffer {
    match kind {
        FieldKind::Checkbox => FieldBuffer::Checked(value.as_bool().unwrap_or(false)),
        FieldKind::Enum(_) => FieldBuffer::Index(value.as_int().unwrap_or(0)),
        FieldKind::MultilineText => {
            FieldBuffer::Text(value.as_string_list().map(|l| l.join("\n")).unwrap_or_default())
        }
        FieldKind::SignedInteger | FieldKind::UnsignedInteger => FieldBuffer::Text(match value {
            ConfigValue::UInt(u) => u.to_string(),
            other => other.as_int().unwrap_or(0).to_string(),
        }),
        FieldKind::Double => FieldBuffer::Text(value.as_float().unwrap_or(0.0).to_string()),
        FieldKind::Text => FieldBuffer::Text(value.as_str().unwrap_or_default().to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionsSection {
    pub name: String,
    pub fields: Vec<OptionsField>,
}

#[derive(Debug, Clone)]
pub struct OptionsModel {
    sections: Vec<OptionsSection>,
    current: Option<usize>,
    open: bool,
}

impl OptionsModel {
    /// Build the dialog state from the registered variables and their
    /// current values.
    pub fn from_config(config: &Configuration) -> Self {
        let mut sections: Vec<OptionsSection> = config
            .sections()
            .into_iter()
            .map(|(name, vars)| OptionsSection {
                name: name.to_string(),
                fields: vars
                    .into_iter()
                    .map(|desc| {
                        let current = config.value(&desc.key).unwrap_or(&desc.default);
                        OptionsField::new(desc, current)
                    })
                    .collect(),
            })
            .collect();
        sections.sort_by_key(|s| s.name.to_lowercase());

        // Second section when available, matching the dialog's first paint
        let current = (!sections.is_empty()).then(|| (sections.len() - 1).min(1));
        Self {
            sections,
            current,
            open: true,
        }
    }

    pub fn sections(&self) -> &[OptionsSection] {
        &self.sections
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn current_section(&self) -> Option<&OptionsSection> {
        self.sections.get(self.current?)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Show another section. Out-of-range rows show nothing.
    pub fn set_current_section(&mut self, index: usize) {
        self.current = (index < self.sections.len()).then_some(index);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn field(&self, key: &str) -> Option<&OptionsField> {
        self.sections.iter().flat_map(|s| &s.fields).find(|f| f.key == key)
    }

    /// Replace a field's edit buffer. Returns `false` for unknown keys.
    pub fn set_field(&mut self, key: &str, buffer: FieldBuffer) -> bool {
        match self
            .sections
            .iter_mut()
            .flat_map(|s| &mut s.fields)
            .find(|f| f.key == key)
        {
            Some(field) => {
                field.buffer = buffer;
                true
            }
            None => false,
        }
    }

    /// Restore defaults in the current section's buffers.
    pub fn reset_section(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        if let Some(section) = self.sections.get_mut(index) {
            section.fields.iter_mut().for_each(OptionsField::reset);
        }
    }

    /// Restore defaults in every buffer.
    pub fn reset_all(&mut self) {
        self.sections
            .iter_mut()
            .flat_map(|s| &mut s.fields)
            .for_each(OptionsField::reset);
    }

    /// Write every buffer into `config`. Buffers that do not parse keep the
    /// stored value. Returns the number of values written.
    pub fn apply(&self, config: &mut Configuration) -> Result<usize, ConfigError> {
        let mut written = 0;
        for field in self.sections.iter().flat_map(|s| &s.fields) {
            match field.parse() {
                Some(value) => {
                    config.set_value(&field.key, value)?;
                    written += 1;
                }
                None => warn!("options: '{}' has an invalid value {:?}", field.key, field.buffer),
            }
        }
        Ok(written)
    }

    /// Handle a button click.
    pub fn press(&mut self, button: OptionsButton, config: &mut Configuration) -> Result<(), ConfigError> {
        match button {
            OptionsButton::ResetAll => self.reset_all(),
            OptionsButton::ResetThese => self.reset_section(),
            OptionsButton::Cancel => self.open = false,
            OptionsButton::Apply => {
                self.apply(config)?;
            }
            OptionsButton::Ok => {
                self.apply(config)?;
                self.open = false;
            }
        }
        Ok(())
    }

    /// Plain-text rendering of the dialog, one `label: value` line per field.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            let marker = if Some(i) == self.current { '>' } else { ' ' };
            out.push_str(&format!("{marker} [{}]\n", section.name));
            for field in &section.fields {
                let value = match (&field.kind, &field.buffer) {
                    (FieldKind::Enum(items), FieldBuffer::Index(i)) => usize::try_from(*i)
                        .ok()
                        .and_then(|i| items.get(i))
                        .cloned()
                        .unwrap_or_else(|| i.to_string()),
                    (_, FieldBuffer::Checked(b)) => b.to_string(),
                    (_, FieldBuffer::Index(i)) => i.to_string(),
                    (_, FieldBuffer::Text(t)) => t.replace('\n', ", "),
                };
                out.push_str(&format!("    {}: {}\n", field.display_text, value));
            }
        }
        out
    }
}

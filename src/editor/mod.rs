//! Editor Module
//!
//! Everything above the core engine: the scene document tying selection,
//! history and viewports together, and the panels written against the
//! generic UI facade.
//!
//! - [`document`] - One open scene with its selection, history and viewports
//! - [`ui`] - Capability traits a widget toolkit implements
//! - [`headless`] - In-memory implementation of the UI traits
//! - [`hierarchy`] - Scene tree panel
//! - [`options`] - Settings dialog model

pub mod document;
pub mod headless;
pub mod hierarchy;
pub mod options;
pub mod ui;

pub use document::SceneDocument;
pub use headless::{HeadlessDialog, HeadlessHierarchyList, HeadlessMainWindow, HeadlessMenu};
pub use hierarchy::HierarchyWindow;
pub use options::{FieldBuffer, FieldKind, OptionsButton, OptionsModel};
pub use ui::{
    AbstractAction, DialogLocationHint, GenericDialog, GenericHierarchyList, GenericMainWindow,
    GenericMenu, ItemId, KeyBinding,
};

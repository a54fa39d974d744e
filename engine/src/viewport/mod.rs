//! Viewport Module
//!
//! Screen layouts, per-viewport cameras and the camera input controller.
//! Like the input module this is window-system agnostic: the host feeds a
//! [`SceneInput`](crate::input::SceneInput) snapshot and a surface size, and
//! reads back camera transforms and rectangles.

pub mod camera;
pub mod controller;
pub mod layout;
pub mod manager;

pub use camera::{Ray, ViewportCamera};
pub use controller::{Viewport, ViewportUpdateParams};
pub use layout::{IntRect, MAX_VIEWPORTS, ViewportLayout};
pub use manager::ViewportManager;

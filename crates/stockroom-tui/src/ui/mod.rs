//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, status bar and overlays
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling
//! - `screens`: one renderer per page

pub mod input;
pub mod render;
pub mod screens;
pub mod styles;

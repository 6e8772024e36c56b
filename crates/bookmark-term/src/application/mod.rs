//! Rendering and the main loop of the bookmark browser.

pub mod styles;
pub mod ui;

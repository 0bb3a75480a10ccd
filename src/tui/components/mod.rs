//! Widgets shared by every view.

pub mod nav_bar;
pub mod panel;
pub mod status_bar;

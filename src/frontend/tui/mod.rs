//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
pub mod clock_face;
pub mod layout;
pub mod offset_picker;
pub mod palette;
pub mod quiz_panel;

pub use app::TuiFrontend;
pub use palette::ClockPalette;

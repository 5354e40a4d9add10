//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::{AppCore, ClockAction};
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from the clock logic. The frontend owns the
/// screen layout, so it also answers which on-screen control sits under a
/// click.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize) converted to the
    /// frontend-agnostic `FrontendEvent` enum, or an empty list on timeout.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Takes a mutable core because rendering decides where the clock face
    /// lands and hands that geometry back for pointer hit-testing.
    fn render(&mut self, core: &mut AppCore) -> Result<()>;

    /// Control under a click at (x, y) from the last rendered frame
    fn action_at(&self, x: u16, y: u16) -> Option<ClockAction>;

    /// Cleanup and shutdown the frontend
    ///
    /// Restores the terminal (raw mode, mouse capture, alternate screen).
    fn cleanup(&mut self) -> Result<()>;
}

//! Unified enum describing what should happen after the widget handles input.
//!
//! The widget stays free of side effects; the caller matches on `InputResult`
//! and performs speech or shutdown itself.

use crate::core::clock::ClockTime;

/// Result of applying an action or pointer event to the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Nothing changed (action not valid in the current phase)
    Continue,

    /// Widget state changed, redraw
    Updated,

    /// Read this time aloud
    Speak { time: ClockTime },

    /// Leave the application
    Quit,
}

impl InputResult {
    /// Helper to turn a "did anything change" flag into a result
    pub fn updated_if(changed: bool) -> Self {
        if changed {
            InputResult::Updated
        } else {
            InputResult::Continue
        }
    }

    /// Check if this result changes what is on screen
    pub fn is_update(&self) -> bool {
        matches!(self, InputResult::Updated)
    }
}

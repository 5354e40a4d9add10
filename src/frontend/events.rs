//! Frontend-agnostic input events.
//!
//! Frontends translate their native event streams (crossterm today) into this
//! enum so the core only handles one event shape.

use crossterm::event::{KeyCode, KeyModifiers, MouseEventKind};

/// Events emitted by frontends, converted to this unified format
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Mouse input (doubles as pointer/touch input)
    Mouse {
        kind: MouseEventKind,
        x: u16,
        y: u16,
        modifiers: KeyModifiers,
    },
    /// Terminal/window resize
    Resize { width: u16, height: u16 },
}

impl FrontendEvent {
    /// Create a key event
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }

    /// Create a mouse event
    pub fn mouse(kind: MouseEventKind, x: u16, y: u16, modifiers: KeyModifiers) -> Self {
        Self::Mouse {
            kind,
            x,
            y,
            modifiers,
        }
    }

    /// Create a resize event
    pub fn resize(width: u16, height: u16) -> Self {
        Self::Resize { width, height }
    }

    /// Position of a left-button press, if this is one
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            Self::Mouse {
                kind: MouseEventKind::Down(crossterm::event::MouseButton::Left),
                x,
                y,
                ..
            } => Some((*x, *y)),
            _ => None,
        }
    }
}

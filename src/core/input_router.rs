//! Keyboard routing
//!
//! Every clickable control has a key. Keys map to the same `ClockAction`s the
//! buttons produce, so the widget never cares where an action came from.

use crate::core::state::ClockAction;
use crossterm::event::{KeyCode, KeyModifiers};

/// Resolve a key press to an action, if bound
pub fn route_key(code: KeyCode, modifiers: KeyModifiers) -> Option<ClockAction> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(ClockAction::Quit),
            _ => None,
        };
    }

    let action = match code {
        KeyCode::Char('a') => ClockAction::RevealAnswer,
        KeyCode::Char('b') => ClockAction::OpenBonus,
        KeyCode::Char('q') | KeyCode::Enter => ClockAction::AskBonus,
        KeyCode::Char('r') => ClockAction::RevealBonus,
        KeyCode::Char('n') => ClockAction::NextQuestion,
        KeyCode::Char('s') => ClockAction::Speak,
        KeyCode::Char('x') => ClockAction::Reset,
        KeyCode::Up | KeyCode::Char('k') => ClockAction::CursorUp,
        KeyCode::Down | KeyCode::Char('j') => ClockAction::CursorDown,
        KeyCode::Char(' ') => ClockAction::ChooseSelected,
        KeyCode::Esc => ClockAction::Quit,
        _ => return None,
    };
    Some(action)
}

/// Key hint shown next to a control
pub fn key_hint(action: ClockAction) -> &'static str {
    match action {
        ClockAction::RevealAnswer => "a",
        ClockAction::OpenBonus => "b",
        ClockAction::AskBonus => "q",
        ClockAction::RevealBonus => "r",
        ClockAction::NextQuestion => "n",
        ClockAction::Speak => "s",
        ClockAction::Reset => "x",
        ClockAction::CursorUp => "↑",
        ClockAction::CursorDown => "↓",
        ClockAction::ChooseSelected | ClockAction::ChooseOption(_) => "space",
        ClockAction::Quit => "esc",
    }
}

//! Terminal input mapping.
//!
//! Keyboard and mouse both funnel into the same flap action, so the game
//! never needs to know where an input came from.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

/// What the host loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Flap,
    Quit,
}

/// Map a raw terminal event. `play_area` is where a click counts as a flap.
pub fn map_event(event: &Event, play_area: Rect) -> Option<InputAction> {
    match event {
        Event::Key(key) => map_key(*key),
        Event::Mouse(mouse) => map_mouse(*mouse, play_area),
        _ => None,
    }
}

pub fn map_key(key: KeyEvent) -> Option<InputAction> {
    // Release and auto-repeat events would double-flap on terminals that report them
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(InputAction::Flap),
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(InputAction::Flap)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

pub fn map_mouse(mouse: MouseEvent, play_area: Rect) -> Option<InputAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if contains(play_area, mouse.column, mouse.row) => {
            Some(InputAction::Flap)
        }
        _ => None,
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

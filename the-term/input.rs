//! Input handling - maps crossterm events to session events.

use crossterm::event::{
  KeyCode,
  KeyEvent,
  KeyEventKind,
  KeyModifiers,
  MouseButton,
  MouseEvent,
  MouseEventKind,
};
use the_lib::Event;

use crate::layout::{
  Hit,
  MenuLayout,
  Placed,
  hit_test,
};

/// Translates a key press. Returns `None` for keys without a binding.
pub fn map_key(key: KeyEvent) -> Option<Event> {
  if key.kind == KeyEventKind::Release {
    return None;
  }
  let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
  let alt = key.modifiers.contains(KeyModifiers::ALT);
  let shift = key.modifiers.contains(KeyModifiers::SHIFT);

  if ctrl {
    if let KeyCode::Char(ch) = key.code {
      return control_binding(ch, shift);
    }
  } else if alt {
    return match key.code {
      KeyCode::Char('b') => Some(Event::WordLeft),
      KeyCode::Char('f') => Some(Event::WordRight),
      KeyCode::Char('g') => Some(Event::Home),
      KeyCode::Char('G') => Some(Event::End),
      KeyCode::Char('h') => Some(Event::Up),
      KeyCode::Char('j') => Some(Event::PageDown),
      KeyCode::Char('k') => Some(Event::PageUp),
      KeyCode::Char('l') => Some(Event::Down),
      _ => None,
    };
  }

  let event = match key.code {
    KeyCode::Char(ch) => Event::Insert(ch.to_string()),
    KeyCode::Enter => confirm(shift, ctrl),
    KeyCode::Esc => Event::Cancel,
    KeyCode::Backspace => Event::Backspace,
    KeyCode::Delete => Event::Delete,
    KeyCode::Tab => Event::Complete,
    KeyCode::Left if ctrl => Event::WordLeft,
    KeyCode::Right if ctrl => Event::WordRight,
    KeyCode::Left => Event::Left,
    KeyCode::Right => Event::Right,
    KeyCode::Up => Event::Up,
    KeyCode::Down => Event::Down,
    KeyCode::PageUp => Event::PageUp,
    KeyCode::PageDown => Event::PageDown,
    KeyCode::Home => Event::Home,
    KeyCode::End => Event::End,
    _ => return None,
  };
  Some(event)
}

fn control_binding(ch: char, shift: bool) -> Option<Event> {
  let event = match ch.to_ascii_lowercase() {
    'a' => Event::Home,
    'b' => Event::Left,
    'c' | 'g' | '[' => Event::Cancel,
    'd' => Event::Delete,
    'e' => Event::End,
    'f' => Event::Right,
    'h' => Event::Backspace,
    'i' => Event::Complete,
    'j' | 'm' => confirm(shift, false),
    'k' => Event::DeleteToEnd,
    'n' => Event::Down,
    'p' => Event::Up,
    'u' => Event::DeleteToStart,
    'w' => Event::DeleteWord,
    _ => return None,
  };
  Some(event)
}

fn confirm(input_only: bool, keep_open: bool) -> Event {
  Event::Confirm {
    input_only,
    keep_open,
  }
}

/// Translates a pointer event using the current layout.
pub fn map_mouse(
  mouse: MouseEvent,
  layout: &MenuLayout,
  placed: &[Placed],
  has_prev_page: bool,
) -> Option<Event> {
  let hit = hit_test(layout, placed, has_prev_page, mouse.column, mouse.row);
  let keep_open = mouse.modifiers.contains(KeyModifiers::CONTROL);

  match mouse.kind {
    MouseEventKind::Down(MouseButton::Right) => Some(Event::Cancel),
    MouseEventKind::ScrollUp => Some(Event::PageUp),
    MouseEventKind::ScrollDown => Some(Event::PageDown),
    MouseEventKind::Down(MouseButton::Left) => {
      match hit? {
        Hit::Input => Some(Event::ClearQuery),
        Hit::PrevPage => Some(Event::PageUp),
        Hit::NextPage => Some(Event::PageDown),
        Hit::Item(pos) => Some(Event::Pick { pos, keep_open }),
      }
    },
    MouseEventKind::Moved => {
      match hit? {
        Hit::Item(pos) => Some(Event::Hover(pos)),
        _ => None,
      }
    },
    _ => None,
  }
}

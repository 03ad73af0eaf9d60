//! Rendering - draws the session state into a ratatui frame.

use ratatui::{
  Frame,
  buffer::Buffer,
  prelude::Rect,
  style::Style,
};
use the_core::width::{
  str_width,
  truncate_to_width,
};
use the_lib::{
  Session,
  viewport::Measure,
};

use crate::{
  layout::{
    MenuLayout,
    Placed,
  },
  theme::Theme,
};

/// Cells of padding around every drawn text, split between both sides.
pub const PADDING: usize = 2;

const ICON_GLYPH: &str = "■";

/// Terminal cell measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasure {
  /// Cells reserved for an icon in front of the text.
  pub icon_cells: u16,
}

impl Measure for CellMeasure {
  fn text_width(&self, text: &str) -> usize {
    str_width(text) + PADDING + self.icon_cells as usize
  }
}

/// What the renderer needs besides the session and its layout.
pub struct View<'a> {
  pub prompt:     Option<&'a str>,
  pub password:   bool,
  pub theme:      &'a Theme,
  pub icon_cells: u16,
}

pub fn draw(frame: &mut Frame, session: &Session, layout: &MenuLayout, placed: &[Placed], view: &View) {
  let theme = view.theme;
  let buf = frame.buffer_mut();
  buf.set_style(layout.area, theme.normal);

  if let Some(prompt) = view.prompt.filter(|prompt| !prompt.is_empty()) {
    draw_text(buf, layout.prompt, prompt, theme.selected);
  }

  let cursor = draw_input(buf, layout.input, session, view);

  if !layout.is_grid() {
    if session.has_prev_page() {
      draw_text(buf, layout.prev_arrow, "<", theme.normal);
    }
    if session.has_next_page() {
      draw_text(buf, layout.next_arrow, ">", theme.normal);
    }
  }

  let selected = session.selected();
  for entry in placed {
    let item = session.items().get(session.matches().ids()[entry.pos]);
    let style = theme.item(selected == Some(entry.pos), item.emitted);
    let mut rect = entry.rect;
    if view.icon_cells > 0 && layout.is_grid() {
      buf.set_style(rect, style);
      let cells = view.icon_cells.min(rect.width.saturating_sub(1));
      if item.icon.image().is_some() && cells > 0 {
        buf.set_stringn(rect.x + 1, rect.y, ICON_GLYPH, cells as usize, style);
      }
      rect.x += cells;
      rect.width -= cells;
    }
    draw_text(buf, rect, &item.text, style);
  }

  if let Some(position) = cursor {
    frame.set_cursor_position(position);
  }
}

/// Draws a padded text clipped to `rect`.
fn draw_text(buf: &mut Buffer, rect: Rect, text: &str, style: Style) {
  if rect.width == 0 || rect.height == 0 {
    return;
  }
  buf.set_style(rect, style);
  let inner = (rect.width as usize).saturating_sub(PADDING);
  let (visible, _) = truncate_to_width(text, inner);
  buf.set_stringn(rect.x + 1, rect.y, visible, inner, style);
}

/// Draws the query, scrolled so the cursor stays inside the field, and
/// returns the cursor cell.
fn draw_input(buf: &mut Buffer, rect: Rect, session: &Session, view: &View) -> Option<(u16, u16)> {
  if rect.width == 0 || rect.height == 0 {
    return None;
  }
  let query = session.query();
  let masked;
  let (text, cursor) = if view.password {
    masked = ".".repeat(query.text().chars().count());
    (masked.as_str(), query.cursor_char())
  } else {
    (query.text(), query.cursor())
  };

  let inner = (rect.width as usize).saturating_sub(PADDING).max(1);
  let cursor_col = str_width(&text[..cursor]);
  let skip = (cursor_col + 1).saturating_sub(inner);
  let shown = skip_columns(text, skip);
  let (visible, _) = truncate_to_width(shown, inner);

  buf.set_style(rect, view.theme.normal);
  buf.set_stringn(rect.x + 1, rect.y, visible, inner, view.theme.normal);

  let col = cursor_col - skip_width(text, shown);
  Some((rect.x + 1 + col as u16, rect.y))
}

/// Drops leading characters until at least `columns` cells are skipped.
fn skip_columns(text: &str, columns: usize) -> &str {
  let mut skipped = 0;
  for (idx, ch) in text.char_indices() {
    if skipped >= columns {
      return &text[idx..];
    }
    skipped += str_width(&text[idx..idx + ch.len_utf8()]);
  }
  if skipped >= columns { &text[text.len()..] } else { "" }
}

/// Width of the prefix of `text` that `tail` was cut from.
fn skip_width(text: &str, tail: &str) -> usize {
  str_width(&text[..text.len() - tail.len()])
}

//! The editable query line.
//!
//! The cursor is a byte offset that always sits on a char boundary; every
//! motion steps whole encoded characters.

use the_core::chars::{
  byte_to_char_idx,
  next_char_boundary,
  next_word_boundary,
  prev_char_boundary,
  prev_word_boundary,
};

use crate::tokenizer::Delimiters;

/// Maximum query length in bytes. Insertions past it are dropped.
pub const QUERY_CAPACITY: usize = 8191;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
  text:   String,
  cursor: usize,
}

impl Query {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn text(&self) -> &str {
    &self.text
  }

  /// Cursor position in bytes.
  #[inline]
  pub fn cursor(&self) -> usize {
    self.cursor
  }

  /// Cursor position in characters.
  pub fn cursor_char(&self) -> usize {
    byte_to_char_idx(&self.text, self.cursor)
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  #[inline]
  pub fn at_start(&self) -> bool {
    self.cursor == 0
  }

  #[inline]
  pub fn at_end(&self) -> bool {
    self.cursor == self.text.len()
  }

  /// Inserts `text` at the cursor. Returns whether the query changed.
  pub fn insert(&mut self, text: &str) -> bool {
    if text.is_empty() || self.text.len() + text.len() > QUERY_CAPACITY {
      return false;
    }
    self.text.insert_str(self.cursor, text);
    self.cursor += text.len();
    true
  }

  /// Replaces the whole query and moves the cursor to its end.
  pub fn set(&mut self, text: &str) {
    let mut end = text.len().min(QUERY_CAPACITY);
    while !text.is_char_boundary(end) {
      end -= 1;
    }
    self.text.clear();
    self.text.push_str(&text[..end]);
    self.cursor = self.text.len();
  }

  pub fn backspace(&mut self) -> bool {
    if self.at_start() {
      return false;
    }
    let prev = prev_char_boundary(&self.text, self.cursor);
    self.remove(prev..self.cursor)
  }

  pub fn delete(&mut self) -> bool {
    if self.at_end() {
      return false;
    }
    let next = next_char_boundary(&self.text, self.cursor);
    self.remove(self.cursor..next)
  }

  pub fn move_left(&mut self) -> bool {
    let prev = prev_char_boundary(&self.text, self.cursor);
    self.move_to(prev)
  }

  pub fn move_right(&mut self) -> bool {
    let next = next_char_boundary(&self.text, self.cursor);
    self.move_to(next)
  }

  pub fn move_to_start(&mut self) -> bool {
    self.move_to(0)
  }

  pub fn move_to_end(&mut self) -> bool {
    self.move_to(self.text.len())
  }

  pub fn word_left(&mut self, delimiters: &Delimiters) -> bool {
    let target = prev_word_boundary(&self.text, self.cursor, |ch| delimiters.contains(ch));
    self.move_to(target)
  }

  pub fn word_right(&mut self, delimiters: &Delimiters) -> bool {
    let target = next_word_boundary(&self.text, self.cursor, |ch| delimiters.contains(ch));
    self.move_to(target)
  }

  pub fn delete_to_start(&mut self) -> bool {
    self.remove(0..self.cursor)
  }

  pub fn delete_to_end(&mut self) -> bool {
    self.remove(self.cursor..self.text.len())
  }

  /// Deletes the word before the cursor along with any delimiters between
  /// it and the cursor.
  pub fn delete_word(&mut self, delimiters: &Delimiters) -> bool {
    let start = prev_word_boundary(&self.text, self.cursor, |ch| delimiters.contains(ch));
    self.remove(start..self.cursor)
  }

  fn move_to(&mut self, target: usize) -> bool {
    let changed = self.cursor != target;
    self.cursor = target;
    changed
  }

  fn remove(&mut self, range: std::ops::Range<usize>) -> bool {
    if range.is_empty() {
      return false;
    }
    if self.cursor >= range.end {
      self.cursor -= range.len();
    } else if self.cursor > range.start {
      self.cursor = range.start;
    }
    self.text.replace_range(range, "");
    true
  }
}

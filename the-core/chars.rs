/// Returns the byte index of the char boundary after `idx`.
///
/// `idx` is clamped to `text.len()`. At the end of the text the length is
/// returned unchanged.
#[inline]
pub fn next_char_boundary(text: &str, idx: usize) -> usize {
  let idx = idx.min(text.len());
  text[idx..]
    .chars()
    .next()
    .map_or(idx, |ch| idx + ch.len_utf8())
}

/// Returns the byte index of the char boundary before `idx`.
#[inline]
pub fn prev_char_boundary(text: &str, idx: usize) -> usize {
  let idx = idx.min(text.len());
  text[..idx]
    .chars()
    .next_back()
    .map_or(0, |ch| idx - ch.len_utf8())
}

/// Converts a byte index into a char index.
#[inline]
pub fn byte_to_char_idx(text: &str, byte_idx: usize) -> usize {
  text[..byte_idx.min(text.len())].chars().count()
}

/// Returns the byte index of the start of the word before `idx`.
///
/// First skips a run of delimiters going backwards, then a run of
/// non-delimiters.
pub fn prev_word_boundary(text: &str, idx: usize, is_delimiter: impl Fn(char) -> bool) -> usize {
  let mut idx = idx.min(text.len());
  let prev_char = |idx: usize| text[..idx].chars().next_back();

  while idx > 0 && prev_char(idx).is_some_and(&is_delimiter) {
    idx = prev_char_boundary(text, idx);
  }
  while idx > 0 && prev_char(idx).is_some_and(|ch| !is_delimiter(ch)) {
    idx = prev_char_boundary(text, idx);
  }
  idx
}

/// Returns the byte index of the end of the word after `idx`.
pub fn next_word_boundary(text: &str, idx: usize, is_delimiter: impl Fn(char) -> bool) -> usize {
  let mut idx = idx.min(text.len());
  let next_char = |idx: usize| text[idx..].chars().next();

  while idx < text.len() && next_char(idx).is_some_and(&is_delimiter) {
    idx = next_char_boundary(text, idx);
  }
  while idx < text.len() && next_char(idx).is_some_and(|ch| !is_delimiter(ch)) {
    idx = next_char_boundary(text, idx);
  }
  idx
}

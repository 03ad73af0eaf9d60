//! Display width of text in terminal cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Returns the display width of a single grapheme cluster.
#[inline]
pub fn grapheme_width(g: &str) -> usize {
  if g.is_ascii() {
    g.len()
  } else {
    // Ill-formed clusters still take up a cell so they stay visible.
    UnicodeWidthStr::width(g).max(1)
  }
}

/// Returns the display width of `text`.
pub fn str_width(text: &str) -> usize {
  if text.is_ascii() {
    return text.len();
  }
  text.graphemes(true).map(grapheme_width).sum()
}

/// Returns the longest prefix of `text` that fits into `budget` cells,
/// together with its width.
///
/// Never splits a grapheme cluster.
pub fn truncate_to_width(text: &str, budget: usize) -> (&str, usize) {
  let mut width = 0;
  for (idx, g) in text.grapheme_indices(true) {
    let w = grapheme_width(g);
    if width + w > budget {
      return (&text[..idx], width);
    }
    width += w;
  }
  (text, width)
}

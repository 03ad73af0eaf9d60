//! Menu items and the store that owns them.
//!
//! Items are read once from the input stream, one per line, and keep their
//! original order for the whole session. Each line may start with option
//! tokens that annotate the item:
//!
//! ```text
//! --icon=/usr/share/pixmaps/firefox.png --value=firefox Firefox Browser
//! ```
//!
//! Recognised options are `--icon=`, `--value=` and `--id=`. Each may appear
//! at most once, in any order; the first token that is not a fresh option
//! starts the label, which runs to the end of the line.

use std::{
  cell::OnceCell,
  io::BufRead,
};

use thiserror::Error;

use crate::icon::Icon;

/// Result type for item store operations.
pub type Result<T> = std::result::Result<T, ItemStoreError>;

#[derive(Debug, Error)]
pub enum ItemStoreError {
  #[error("failed to read item list: {0}")]
  Read(#[from] std::io::Error),
}

/// Index of an item inside its [`ItemStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

impl ItemId {
  #[inline]
  pub const fn new(index: usize) -> Self {
    Self(index)
  }

  #[inline]
  pub const fn index(self) -> usize {
    self.0
  }
}

#[derive(Debug, Clone, Default)]
pub struct Item {
  /// Label shown in the menu and matched against the query.
  pub text:    String,
  /// Printed instead of `text` when the item is chosen.
  pub value:   Option<String>,
  pub id:      Option<String>,
  pub icon:    Icon,
  /// Set once the item has been chosen without closing the menu.
  pub emitted: bool,
  folded:      OnceCell<String>,
}

impl Item {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      ..Default::default()
    }
  }

  /// Parses one input line, consuming leading option tokens.
  pub fn parse(line: &str) -> Self {
    let mut icon = None;
    let mut value = None;
    let mut id = None;
    let mut rest = line;

    while rest.starts_with("--") {
      let Some((prefix, option)) = OPTIONS
        .iter()
        .find(|(prefix, _)| rest.starts_with(prefix))
      else {
        break;
      };
      let slot = match option {
        LineOption::Icon => &mut icon,
        LineOption::Value => &mut value,
        LineOption::Id => &mut id,
      };
      if slot.is_some() {
        break;
      }

      let after = &rest[prefix.len()..];
      let (parsed, remainder) = after.split_once(' ').unwrap_or((after, ""));
      *slot = Some(parsed.to_string());
      rest = remainder;
    }

    Self {
      text: rest.to_string(),
      value,
      id,
      icon: Icon::with_path(icon),
      ..Default::default()
    }
  }

  /// The line printed when this item is chosen.
  #[inline]
  pub fn output(&self) -> &str {
    self.value.as_deref().unwrap_or(&self.text)
  }

  /// Lowercased label, computed on first use by case-insensitive matching.
  pub(crate) fn folded(&self) -> &str {
    self.folded.get_or_init(|| self.text.to_lowercase())
  }
}

#[derive(Debug, Clone, Copy)]
enum LineOption {
  Icon,
  Value,
  Id,
}

const OPTIONS: [(&str, LineOption); 3] = [
  ("--icon=", LineOption::Icon),
  ("--value=", LineOption::Value),
  ("--id=", LineOption::Id),
];

/// Owns every item of the session, in input order.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
  items: Vec<Item>,
}

impl ItemStore {
  pub fn new(items: Vec<Item>) -> Self {
    Self { items }
  }

  /// Builds a store by parsing each line.
  pub fn from_lines<I, S>(lines: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self::new(
      lines
        .into_iter()
        .map(|line| Item::parse(line.as_ref()))
        .collect(),
    )
  }

  /// Reads newline separated item records until end of input.
  ///
  /// Invalid UTF-8 is replaced rather than rejected.
  pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
    let mut items = Vec::new();
    let mut buf = Vec::new();
    loop {
      buf.clear();
      if reader.read_until(b'\n', &mut buf)? == 0 {
        break;
      }
      if buf.last() == Some(&b'\n') {
        buf.pop();
      }
      items.push(Item::parse(&String::from_utf8_lossy(&buf)));
    }
    tracing::debug!(count = items.len(), "read menu items");
    Ok(Self::new(items))
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  #[inline]
  pub fn get(&self, id: ItemId) -> &Item {
    &self.items[id.index()]
  }

  #[inline]
  pub fn get_mut(&mut self, id: ItemId) -> &mut Item {
    &mut self.items[id.index()]
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ItemId, &Item)> + ExactSizeIterator {
    self
      .items
      .iter()
      .enumerate()
      .map(|(idx, item)| (ItemId::new(idx), item))
  }
}

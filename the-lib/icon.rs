//! Lazy icon resolution.
//!
//! Icons are resolved the first time an item is drawn and never retried: a
//! failed load is replaced by the loader's fallback and reported once.

use std::path::PathBuf;

use thiserror::Error;

use crate::item::Item;

#[derive(Debug, Error)]
pub enum IconError {
  #[error("icon '{path}' could not be read: {source}")]
  Unreadable {
    path:   String,
    #[source]
    source: std::io::Error,
  },
  #[error("icon command `{command}` failed: {reason}")]
  Command { command: String, reason: String },
}

/// Where the loader should look for an item's icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource<'a> {
  /// Explicit `--icon=` path from the input line.
  Path(&'a str),
  /// Ask an external command for the path, passing the item text.
  Command { command: &'a str, text: &'a str },
  /// Use the item text itself as the path.
  Text(&'a str),
}

/// External collaborator that turns an [`IconSource`] into a loaded icon.
pub trait IconLoader {
  fn load(&mut self, source: IconSource<'_>) -> Result<PathBuf, IconError>;

  /// Icon used when [`IconLoader::load`] fails, if any.
  fn fallback(&mut self) -> Option<PathBuf>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IconState {
  #[default]
  Unresolved,
  Loaded(PathBuf),
  Fallback(Option<PathBuf>),
}

#[derive(Debug, Clone, Default)]
pub struct Icon {
  path:  Option<String>,
  state: IconState,
}

impl Icon {
  pub fn with_path(path: Option<String>) -> Self {
    Self {
      path,
      state: IconState::Unresolved,
    }
  }

  pub fn path(&self) -> Option<&str> {
    self.path.as_deref()
  }

  pub fn state(&self) -> &IconState {
    &self.state
  }

  /// Path of the image to draw, loaded or fallback.
  pub fn image(&self) -> Option<&PathBuf> {
    match &self.state {
      IconState::Loaded(path) => Some(path),
      IconState::Fallback(path) => path.as_ref(),
      IconState::Unresolved => None,
    }
  }
}

/// Resolves the icon of `item` unless an attempt was already made.
pub fn resolve<'a, L>(
  item: &'a mut Item,
  icon_command: Option<&str>,
  loader: &mut L,
) -> &'a IconState
where
  L: IconLoader + ?Sized,
{
  if item.icon.state != IconState::Unresolved {
    return &item.icon.state;
  }

  let source = match (item.icon.path.as_deref(), icon_command) {
    (Some(path), _) => IconSource::Path(path),
    (None, Some(command)) => {
      IconSource::Command {
        command,
        text: &item.text,
      }
    },
    (None, None) => IconSource::Text(&item.text),
  };

  item.icon.state = match loader.load(source) {
    Ok(path) => IconState::Loaded(path),
    Err(err) => {
      tracing::warn!(%err, "failed loading icon for {}", item.text);
      IconState::Fallback(loader.fallback())
    },
  };
  &item.icon.state
}

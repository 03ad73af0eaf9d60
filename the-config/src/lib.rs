//! User configuration for the menu.
//!
//! Settings are read from `config.toml` in the user's config directory
//! (`$XDG_CONFIG_HOME/the-menu` on Linux) unless a file is given explicitly.
//! Every key is optional:
//!
//! ```toml
//! prompt = "run:"
//! lines = 10
//! case-insensitive = true
//! word-delimiters = " /"
//!
//! [colors.selected]
//! fg = "#000000"
//! bg = "#dddddd"
//! ```

mod color;

use std::{
  borrow::Cow,
  io,
  path::{
    Path,
    PathBuf,
  },
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};
use eyre::{
  Result,
  WrapErr,
};
use serde::Deserialize;

pub use crate::color::{
  Color,
  ColorError,
  Colors,
  Scheme,
};

const APP_DIR: &str = "the-menu";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
  pub prompt:           Option<String>,
  /// Grid rows. Zero means a single horizontal line.
  pub lines:            usize,
  /// Grid columns. Zero means one column when `lines` is set.
  pub columns:          usize,
  pub case_insensitive: bool,
  /// Characters that separate query tokens and words.
  pub word_delimiters:  String,
  /// Matches to skip before the initial selection. Negative counts back
  /// from `lines`.
  pub preselected:      isize,
  pub password:         bool,
  /// Program that prints an icon path for the item text it receives.
  pub icon_command:     Option<String>,
  /// Icon edge in cells. Zero disables icons.
  pub icon_size:        u16,
  pub icon_fallback:    Option<PathBuf>,
  pub colors:           Colors,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      prompt:           None,
      lines:            0,
      columns:          0,
      case_insensitive: false,
      word_delimiters:  " ".to_string(),
      preselected:      0,
      password:         false,
      icon_command:     None,
      icon_size:        0,
      icon_fallback:    None,
      colors:           Colors::default(),
    }
  }
}

impl Config {
  pub fn from_toml(source: &str) -> Result<Self> {
    toml::from_str(source).wrap_err("invalid configuration")
  }

  /// Loads `path`, or the default config file when `path` is `None`.
  ///
  /// A missing default file yields the defaults; a missing explicit file is
  /// an error.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let (path, explicit) = match path {
      Some(path) => (Cow::Borrowed(path), true),
      None => (Cow::Owned(config_file()?), false),
    };

    let source = match std::fs::read_to_string(&path) {
      Ok(source) => source,
      Err(err) if !explicit && err.kind() == io::ErrorKind::NotFound => {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Self::default());
      },
      Err(err) => {
        return Err(err).wrap_err_with(|| format!("failed to read {}", path.display()));
      },
    };

    let config =
      Self::from_toml(&source).wrap_err_with(|| format!("in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
  }
}

/// Directory holding `config.toml`.
///
/// `THE_MENU_CONFIG_DIR` overrides the platform default.
pub fn config_dir() -> Result<PathBuf> {
  if let Some(dir) = std::env::var_os("THE_MENU_CONFIG_DIR") {
    return Ok(PathBuf::from(dir));
  }
  let strategy = choose_base_strategy().wrap_err("unable to find the config directory")?;
  Ok(strategy.config_dir().join(APP_DIR))
}

pub fn config_file() -> Result<PathBuf> {
  Ok(config_dir()?.join("config.toml"))
}

/// Directory for the log file.
pub fn cache_dir() -> Result<PathBuf> {
  let strategy = choose_base_strategy().wrap_err("unable to find the cache directory")?;
  Ok(strategy.cache_dir().join(APP_DIR))
}

pub fn default_log_file() -> Result<PathBuf> {
  Ok(cache_dir()?.join("the-menu.log"))
}

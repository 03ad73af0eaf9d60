//! Colors and color schemes.

use std::{
  fmt,
  str::FromStr,
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
  #[error("color `{0}` must start with `#`")]
  MissingHash(String),
  #[error("color `{0}` must have six hex digits")]
  Length(String),
  #[error("color `{0}` is not valid hex")]
  Hex(String),
}

/// An RGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Color {
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b }
  }

  pub fn parse(text: &str) -> Result<Self, ColorError> {
    let Some(hex) = text.strip_prefix('#') else {
      return Err(ColorError::MissingHash(text.to_string()));
    };
    if hex.len() != 6 {
      return Err(ColorError::Length(text.to_string()));
    }
    if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
      return Err(ColorError::Hex(text.to_string()));
    }
    let value = u32::from_str_radix(hex, 16).map_err(|_| ColorError::Hex(text.to_string()))?;
    Ok(Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
  }
}

impl FromStr for Color {
  type Err = ColorError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    Self::parse(text)
  }
}

impl TryFrom<String> for Color {
  type Error = ColorError;

  fn try_from(text: String) -> Result<Self, Self::Error> {
    Self::parse(&text)
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
  }
}

/// Foreground and background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scheme {
  pub fg: Color,
  pub bg: Color,
}

impl Scheme {
  pub const fn new(fg: Color, bg: Color) -> Self {
    Self { fg, bg }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Colors {
  pub normal:   Scheme,
  pub selected: Scheme,
  /// Items already printed in keep-open mode.
  pub out:      Scheme,
}

impl Default for Colors {
  fn default() -> Self {
    Self {
      normal:   Scheme::new(Color::rgb(0xbb, 0xbb, 0xbb), Color::rgb(0x00, 0x00, 0x00)),
      selected: Scheme::new(Color::rgb(0x00, 0x00, 0x00), Color::rgb(0xdd, 0xdd, 0xdd)),
      out:      Scheme::new(Color::rgb(0x00, 0x00, 0x00), Color::rgb(0x00, 0xff, 0xff)),
    }
  }
}

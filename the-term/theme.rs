//! Terminal styles for the configured color schemes.

use ratatui::style::{
  Color,
  Style,
};
use the_config::{
  Colors,
  Scheme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
  pub normal:   Style,
  pub selected: Style,
  pub out:      Style,
}

impl Theme {
  pub fn new(colors: &Colors) -> Self {
    Self {
      normal:   scheme_style(colors.normal),
      selected: scheme_style(colors.selected),
      out:      scheme_style(colors.out),
    }
  }

  /// Style of a menu entry. The selection wins over the emitted mark.
  pub fn item(&self, selected: bool, emitted: bool) -> Style {
    if selected {
      self.selected
    } else if emitted {
      self.out
    } else {
      self.normal
    }
  }
}

pub fn to_color(color: the_config::Color) -> Color {
  Color::Rgb(color.r, color.g, color.b)
}

fn scheme_style(scheme: Scheme) -> Style {
  Style::default().fg(to_color(scheme.fg)).bg(to_color(scheme.bg))
}

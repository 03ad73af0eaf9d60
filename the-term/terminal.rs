//! Terminal setup using ratatui + crossterm, drawing on stderr.

use std::io::{
  self,
  Stderr,
};

use crossterm::{
  event::{
    DisableBracketedPaste,
    DisableMouseCapture,
    EnableBracketedPaste,
    EnableMouseCapture,
  },
  execute,
  terminal::{
    EnterAlternateScreen,
    LeaveAlternateScreen,
    disable_raw_mode,
    enable_raw_mode,
  },
};
use eyre::{
  Result,
  WrapErr,
};
use ratatui::{
  Terminal as RatatuiTerminal,
  backend::CrosstermBackend,
  prelude::Rect,
};

pub struct Terminal {
  terminal: RatatuiTerminal<CrosstermBackend<Stderr>>,
  active:   bool,
}

impl Terminal {
  pub fn new() -> Result<Self> {
    let backend = CrosstermBackend::new(io::stderr());
    let terminal = RatatuiTerminal::new(backend).wrap_err("failed to open terminal")?;
    Ok(Self {
      terminal,
      active: false,
    })
  }

  pub fn enter(&mut self) -> Result<()> {
    enable_raw_mode().wrap_err("failed to enable raw mode")?;
    self.active = true;
    execute!(
      self.terminal.backend_mut(),
      EnterAlternateScreen,
      EnableMouseCapture,
      EnableBracketedPaste
    )?;
    self.terminal.clear()?;
    Ok(())
  }

  pub fn leave(&mut self) -> Result<()> {
    if !self.active {
      return Ok(());
    }
    self.active = false;
    execute!(
      self.terminal.backend_mut(),
      DisableBracketedPaste,
      DisableMouseCapture,
      LeaveAlternateScreen
    )?;
    self.terminal.show_cursor()?;
    disable_raw_mode()?;
    Ok(())
  }

  pub fn draw<F>(&mut self, f: F) -> Result<()>
  where
    F: for<'a> FnOnce(&mut ratatui::Frame<'a>),
  {
    self.terminal.draw(f)?;
    Ok(())
  }

  pub fn size(&self) -> Result<Rect> {
    let size = self.terminal.size()?;
    Ok(Rect::new(0, 0, size.width, size.height))
  }
}

impl Drop for Terminal {
  fn drop(&mut self) {
    if let Err(err) = self.leave() {
      log::error!("failed to restore terminal: {err}");
    }
  }
}

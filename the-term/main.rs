//! Terminal frontend for the menu.
//!
//! Reads items from standard input, lets the user filter and pick one in
//! the terminal, and prints the choice on standard output.

mod cli;
mod icons;
mod input;
mod layout;
mod logging;
mod render;
mod terminal;
mod theme;

use std::{
  io::{
    self,
    IsTerminal,
    Write,
  },
  process::ExitCode,
};

use crossterm::event::{
  self,
  Event as TermEvent,
};
use eyre::{
  Result,
  WrapErr,
};
use the_config::Config;
use the_core::width::str_width;
use the_lib::{
  Event,
  ItemStore,
  Options,
  Outcome,
  Session,
  matcher::CaseMatching,
  tokenizer::Delimiters,
  viewport::Measure,
};

use crate::{
  cli::CliOptions,
  icons::FsIconLoader,
  layout::{
    MenuLayout,
    MenuMetrics,
    Placed,
    compute_menu_layout,
    place_items,
  },
  render::{
    CellMeasure,
    PADDING,
    View,
  },
  terminal::Terminal,
  theme::Theme,
};

fn main() -> Result<ExitCode> {
  let cli = CliOptions::parse()?;
  if cli.display_version {
    println!("the-menu {}", env!("CARGO_PKG_VERSION"));
    return Ok(ExitCode::SUCCESS);
  }

  let log_file = match cli.log_file.clone() {
    Some(path) => path,
    None => the_config::default_log_file()?,
  };
  logging::setup_logging(cli.verbosity, &log_file)?;

  let mut config = Config::load(cli.config_file.as_deref())?;
  cli.apply(&mut config);

  let items = if config.password {
    ItemStore::default()
  } else {
    let stdin = io::stdin();
    if stdin.is_terminal() {
      log::warn!("reading items from a terminal, end input with Ctrl+D");
    }
    ItemStore::from_reader(stdin.lock()).wrap_err("failed to read items")?
  };
  log::info!("loaded {} items", items.len());

  let mut menu = Menu::new(config, items)?;
  let outcome = menu.run()?;
  // The terminal must be restored before the result goes out.
  drop(menu);

  match outcome {
    Some(line) => {
      println!("{line}");
      Ok(ExitCode::SUCCESS)
    },
    None => Ok(ExitCode::FAILURE),
  }
}

struct Menu {
  terminal:     Terminal,
  session:      Session,
  config:       Config,
  theme:        Theme,
  measure:      CellMeasure,
  metrics:      MenuMetrics,
  layout:       MenuLayout,
  placed:       Vec<Placed>,
  icons:        FsIconLoader,
  icons_active: bool,
}

impl Menu {
  fn new(mut config: Config, items: ItemStore) -> Result<Self> {
    // Grid rows beyond the item count would stay empty.
    config.lines = config.lines.min(items.len());
    if config.lines == 0 {
      config.columns = 0;
    }
    let grid = config.lines > 0;
    let icons_active = grid && config.icon_size > 0;
    let measure = CellMeasure {
      icon_cells: if icons_active { config.icon_size } else { 0 },
    };

    let widest_item = items
      .iter()
      .map(|(_, item)| measure.text_width(&item.text))
      .max()
      .unwrap_or(0);
    let metrics = MenuMetrics {
      prompt_width: config
        .prompt
        .as_deref()
        .filter(|prompt| !prompt.is_empty())
        .map_or(0, |prompt| str_width(prompt) + PADDING) as u16,
      widest_item:  widest_item.min(u16::MAX as usize) as u16,
      rows:         config.lines.min(u16::MAX as usize) as u16,
      columns:      config.columns.min(u16::MAX as usize) as u16,
    };

    let mut terminal = Terminal::new()?;
    terminal.enter()?;
    let layout = compute_menu_layout(terminal.size()?, &metrics);

    let options = Options {
      case:       if config.case_insensitive {
        CaseMatching::Insensitive
      } else {
        CaseMatching::Sensitive
      },
      delimiters: Delimiters::new(config.word_delimiters.clone()),
      capacity:   layout.capacity(),
    };
    let mut session = Session::new(items, options, &measure);
    session.preselect(config.preselected, &measure);

    Ok(Self {
      terminal,
      session,
      theme: Theme::new(&config.colors),
      icons: FsIconLoader::new(config.icon_fallback.clone()),
      config,
      measure,
      metrics,
      layout,
      placed: Vec::new(),
      icons_active,
    })
  }

  /// Runs until the user confirms or cancels. Returns the line to print on
  /// exit, `None` when cancelled.
  fn run(&mut self) -> Result<Option<String>> {
    loop {
      self.draw()?;

      let event = match event::read()? {
        TermEvent::Key(key) => input::map_key(key),
        TermEvent::Mouse(mouse) => {
          input::map_mouse(
            mouse,
            &self.layout,
            &self.placed,
            self.session.has_prev_page(),
          )
        },
        TermEvent::Paste(text) => Some(Event::Paste(text)),
        TermEvent::Resize(..) => {
          self.relayout()?;
          None
        },
        _ => None,
      };
      let Some(event) = event else {
        continue;
      };

      match self.session.handle(event, &self.measure) {
        Outcome::Continue => {},
        Outcome::Emit(line) => {
          let mut stdout = io::stdout().lock();
          writeln!(stdout, "{line}")?;
          stdout.flush()?;
        },
        Outcome::Exit(line) => return Ok(Some(line)),
        Outcome::Cancel => return Ok(None),
      }
    }
  }

  fn relayout(&mut self) -> Result<()> {
    self.layout = compute_menu_layout(self.terminal.size()?, &self.metrics);
    self
      .session
      .set_capacity(self.layout.capacity(), &self.measure);
    Ok(())
  }

  fn draw(&mut self) -> Result<()> {
    if self.icons_active {
      self
        .session
        .resolve_icons(self.config.icon_command.as_deref(), &mut self.icons);
    }

    self.placed = place_items(&self.layout, self.session.visible(), &self.measure);

    let view = View {
      prompt:     self.config.prompt.as_deref(),
      password:   self.config.password,
      theme:      &self.theme,
      icon_cells: self.measure.icon_cells,
    };
    let (session, layout, placed) = (&self.session, &self.layout, &self.placed);
    self
      .terminal
      .draw(|frame| render::draw(frame, session, layout, placed, &view))
  }
}

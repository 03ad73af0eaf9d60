use std::path::PathBuf;

use clap::{
  ArgAction,
  Parser,
};
use eyre::Result;
use the_config::{
  Color,
  Config,
};

/// Options given on the command line. Unset options leave the config file
/// value in place.
#[derive(Clone, Debug, Default)]
pub struct CliOptions {
  pub display_version:  bool,
  pub lines:            Option<usize>,
  pub columns:          Option<usize>,
  pub prompt:           Option<String>,
  pub case_insensitive: bool,
  pub password:         bool,
  pub preselected:      Option<isize>,
  pub normal_bg:        Option<Color>,
  pub normal_fg:        Option<Color>,
  pub selected_bg:      Option<Color>,
  pub selected_fg:      Option<Color>,
  pub icon_command:     Option<String>,
  pub icon_size:        Option<u16>,
  pub verbosity:        u8,
  pub log_file:         Option<PathBuf>,
  pub config_file:      Option<PathBuf>,
}

impl CliOptions {
  pub fn parse() -> Result<Self> {
    let raw = RawCli::parse();
    raw.try_into()
  }

  /// Overrides `config` with every option given on the command line.
  pub fn apply(&self, config: &mut Config) {
    if let Some(prompt) = &self.prompt {
      config.prompt = Some(prompt.clone());
    }
    if let Some(lines) = self.lines {
      config.lines = lines;
    }
    if let Some(columns) = self.columns {
      config.columns = columns;
    }
    config.case_insensitive |= self.case_insensitive;
    config.password |= self.password;
    if let Some(preselected) = self.preselected {
      config.preselected = preselected;
    }
    if let Some(command) = &self.icon_command {
      config.icon_command = Some(command.clone());
    }
    if let Some(size) = self.icon_size {
      config.icon_size = size;
    }

    let colors = &mut config.colors;
    let overrides = [
      (self.normal_bg, &mut colors.normal.bg),
      (self.normal_fg, &mut colors.normal.fg),
      (self.selected_bg, &mut colors.selected.bg),
      (self.selected_fg, &mut colors.selected.fg),
    ];
    for (color, slot) in overrides {
      if let Some(color) = color {
        *slot = color;
      }
    }

    // A grid needs both dimensions; one implies the other.
    match (config.lines, config.columns) {
      (0, columns) if columns > 0 => config.lines = 1,
      (lines, 0) if lines > 0 => config.columns = 1,
      _ => {},
    }
  }
}

#[derive(Parser, Debug)]
#[command(
  name = "the-menu",
  about = "Pick a line from standard input",
  long_about = None,
  version,
  disable_version_flag = true
)]
struct RawCli {
  /// Print version information
  #[arg(short = 'V', long = "version")]
  display_version: bool,

  /// Show items in a grid with this many rows
  #[arg(short = 'l', long = "lines", value_name = "N")]
  lines: Option<usize>,

  /// Number of grid columns
  #[arg(short = 'g', long = "columns", value_name = "N")]
  columns: Option<usize>,

  /// Text shown left of the input field
  #[arg(short = 'p', long = "prompt", value_name = "TEXT")]
  prompt: Option<String>,

  /// Match items case-insensitively
  #[arg(short = 'i', long = "case-insensitive")]
  case_insensitive: bool,

  /// Hide the input and read no items
  #[arg(short = 'P', long = "password")]
  password: bool,

  /// Select the n-th match at start, negative counts back from the rows
  #[arg(short = 'n', long = "preselect", value_name = "N", allow_negative_numbers = true)]
  preselected: Option<isize>,

  /// Normal background color
  #[arg(long = "nb", value_name = "COLOR", value_parser = parse_color)]
  normal_bg: Option<Color>,

  /// Normal foreground color
  #[arg(long = "nf", value_name = "COLOR", value_parser = parse_color)]
  normal_fg: Option<Color>,

  /// Selected background color
  #[arg(long = "sb", value_name = "COLOR", value_parser = parse_color)]
  selected_bg: Option<Color>,

  /// Selected foreground color
  #[arg(long = "sf", value_name = "COLOR", value_parser = parse_color)]
  selected_fg: Option<Color>,

  /// Program printing an icon path for the item text given as argument
  #[arg(long = "icon-command", value_name = "COMMAND")]
  icon_command: Option<String>,

  /// Icon width in cells, grid layout only
  #[arg(long = "icon-size", value_name = "CELLS")]
  icon_size: Option<u16>,

  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE")]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config_file: Option<PathBuf>,
}

impl TryFrom<RawCli> for CliOptions {
  type Error = eyre::Report;

  fn try_from(raw: RawCli) -> Result<Self> {
    Ok(Self {
      display_version:  raw.display_version,
      lines:            raw.lines,
      columns:          raw.columns,
      prompt:           raw.prompt,
      case_insensitive: raw.case_insensitive,
      password:         raw.password,
      preselected:      raw.preselected,
      normal_bg:        raw.normal_bg,
      normal_fg:        raw.normal_fg,
      selected_bg:      raw.selected_bg,
      selected_fg:      raw.selected_fg,
      icon_command:     raw.icon_command,
      icon_size:        raw.icon_size,
      verbosity:        raw.verbosity,
      log_file:         raw.log_file,
      config_file:      raw.config_file,
    })
  }
}

fn parse_color(value: &str) -> std::result::Result<Color, String> {
  Color::parse(value).map_err(|err| err.to_string())
}

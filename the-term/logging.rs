//! File logging.
//!
//! Standard output carries the chosen line and the terminal carries the
//! menu, so log records go to a file.

use std::{
  fs,
  path::Path,
};

use eyre::{
  Result,
  WrapErr,
};

pub fn level_for(verbosity: u8) -> log::LevelFilter {
  match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  }
}

pub fn setup_logging(verbosity: u8, file: &Path) -> Result<()> {
  if let Some(parent) = file.parent() {
    fs::create_dir_all(parent)
      .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
  }

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        std::time::SystemTime::now()
          .duration_since(std::time::UNIX_EPOCH)
          .map(|elapsed| elapsed.as_millis())
          .unwrap_or_default(),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level_for(verbosity))
    .chain(fern::log_file(file).wrap_err_with(|| format!("failed to open {}", file.display()))?)
    .apply()
    .wrap_err("logger already initialised")?;
  Ok(())
}

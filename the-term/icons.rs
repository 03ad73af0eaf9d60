//! Icon lookup on the local filesystem.

use std::{
  fs,
  path::PathBuf,
  process::{
    Command,
    Stdio,
  },
};

use the_lib::icon::{
  IconError,
  IconLoader,
  IconSource,
};

#[derive(Debug, Clone, Default)]
pub struct FsIconLoader {
  fallback: Option<PathBuf>,
}

impl FsIconLoader {
  pub fn new(fallback: Option<PathBuf>) -> Self {
    Self { fallback }
  }
}

impl IconLoader for FsIconLoader {
  fn load(&mut self, source: IconSource<'_>) -> Result<PathBuf, IconError> {
    let path = match source {
      IconSource::Path(path) | IconSource::Text(path) => path.to_string(),
      IconSource::Command { command, text } => run_icon_command(command, text)?,
    };
    check_readable(path)
  }

  fn fallback(&mut self) -> Option<PathBuf> {
    let path = self.fallback.clone()?;
    match check_readable(path.to_string_lossy().into_owned()) {
      Ok(path) => Some(path),
      Err(err) => {
        log::warn!("{err}");
        None
      },
    }
  }
}

/// Runs `command` with the item text appended as the last argument and
/// returns the first line it prints.
fn run_icon_command(command: &str, text: &str) -> Result<String, IconError> {
  let failed = |reason: String| {
    IconError::Command {
      command: command.to_string(),
      reason,
    }
  };

  let mut words = command.split_whitespace();
  let program = words.next().ok_or_else(|| failed("empty command".into()))?;
  let output = Command::new(program)
    .args(words)
    .arg(text)
    .stdin(Stdio::null())
    .stderr(Stdio::null())
    .output()
    .map_err(|err| failed(err.to_string()))?;

  if !output.status.success() {
    return Err(failed(output.status.to_string()));
  }
  let stdout = String::from_utf8_lossy(&output.stdout);
  match stdout.lines().next().map(str::trim) {
    Some(line) if !line.is_empty() => Ok(line.to_string()),
    _ => Err(failed("no output".into())),
  }
}

fn check_readable(path: String) -> Result<PathBuf, IconError> {
  let unreadable = |source| IconError::Unreadable {
    path: path.clone(),
    source,
  };
  let metadata = fs::metadata(&path).map_err(unreadable)?;
  if !metadata.is_file() {
    return Err(unreadable(std::io::Error::other("not a regular file")));
  }
  fs::File::open(&path).map_err(unreadable)?;
  Ok(PathBuf::from(path))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loads_existing_files() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap();
    let mut loader = FsIconLoader::default();
    assert_eq!(
      loader.load(IconSource::Path(path)).unwrap(),
      file.path().to_path_buf()
    );
    assert!(loader.load(IconSource::Text("/definitely/not/here.png")).is_err());
  }

  #[test]
  fn directories_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = FsIconLoader::default();
    let err = loader
      .load(IconSource::Path(dir.path().to_str().unwrap()))
      .unwrap_err();
    assert!(matches!(err, IconError::Unreadable { .. }));
  }

  #[test]
  fn fallback_must_exist() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let mut loader = FsIconLoader::new(Some(file.path().to_path_buf()));
    assert_eq!(loader.fallback(), Some(file.path().to_path_buf()));

    let mut loader = FsIconLoader::new(Some(PathBuf::from("/missing/fallback.png")));
    assert_eq!(loader.fallback(), None);
  }

  #[cfg(unix)]
  #[test]
  fn command_output_names_the_icon() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap();
    let mut loader = FsIconLoader::default();
    let loaded = loader.load(IconSource::Command {
      command: "echo",
      text:    path,
    });
    assert_eq!(loaded.unwrap(), file.path().to_path_buf());

    let err = loader
      .load(IconSource::Command {
        command: "false",
        text:    "x",
      })
      .unwrap_err();
    assert!(matches!(err, IconError::Command { .. }));
  }
}

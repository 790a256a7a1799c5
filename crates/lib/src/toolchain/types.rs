//! Types for toolchain invocation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One external tool call: program path plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<String>,
}

impl Invocation {
  /// File name of the program (e.g. `gcc`), falling back to the whole path.
  pub fn tool(&self) -> String {
    self
      .program
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_else(|| self.program.display().to_string())
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {arg}")?;
    }
    Ok(())
  }
}

/// Errors raised while running a toolchain binary.
#[derive(Debug, Error)]
pub enum ToolchainError {
  /// The tool ran and exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {command}")]
  Failed { command: String, code: Option<i32> },

  /// The tool could not be started at all.
  #[error("failed to spawn {}", .program.display())]
  Spawn {
    program: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Flavor of a link step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkKind {
  Executable,
  /// A shared library, optionally emitting an import library next to it.
  Shared { import_library: Option<PathBuf> },
}

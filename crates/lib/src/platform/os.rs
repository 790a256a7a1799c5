use std::fmt;

use serde::Serialize;

/// Operating system family of the build target.
///
/// Only the Windows/non-Windows split changes artifact naming and linker
/// invocation; the remaining variants exist for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Linux,
  MacOs,
  Windows,
  Other,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Self {
    match std::env::consts::OS {
      "linux" => Self::Linux,
      "macos" => Self::MacOs,
      "windows" => Self::Windows,
      _ => Self::Other,
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
      Self::Other => "other",
    }
  }

  /// Whether artifacts follow Windows naming (`.dll`, `.exe`, import libraries).
  pub fn is_windows(&self) -> bool {
    matches!(self, Self::Windows)
  }

  /// File name of an executable called `name`.
  pub fn executable_name(&self, name: &str) -> String {
    if self.is_windows() {
      format!("{name}.exe")
    } else {
      name.to_string()
    }
  }

  /// File name of a shared library called `name` (without the `lib` prefix).
  pub fn shared_library_name(&self, name: &str) -> String {
    if self.is_windows() {
      format!("lib{name}.dll")
    } else {
      format!("lib{name}.so")
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

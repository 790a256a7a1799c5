use std::fmt;

use serde::Serialize;

/// Processor width a toolchain produces code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bits {
  #[serde(rename = "64")]
  B64,
  #[serde(rename = "32")]
  B32,
}

impl Bits {
  /// Width of the running process. Anything that is not a 32-bit build counts as 64-bit.
  pub fn native() -> Self {
    if cfg!(target_pointer_width = "32") {
      Self::B32
    } else {
      Self::B64
    }
  }

  /// Parse the `"64"` / `"32"` spelling used by flags and the environment.
  pub fn from_str_exact(value: &str) -> Option<Self> {
    match value {
      "64" => Some(Self::B64),
      "32" => Some(Self::B32),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::B64 => "64",
      Self::B32 => "32",
    }
  }
}

impl fmt::Display for Bits {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

pub mod bits;
pub mod os;

use std::fmt;

pub use bits::Bits;
pub use os::Os;

/// Build target identifier combining OS and processor width (e.g., "linux-64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub bits: Bits,
}

impl Platform {
  pub fn new(os: Os, bits: Bits) -> Self {
    Self { os, bits }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.os, self.bits)
  }
}

//! VERSION file parsing.
//!
//! The file holds one significant line `<type><major>.<minor>.<micro>`, where
//! the type is `v` (release) or `p` (prerelease) and each component is a
//! one- or two-digit hex string whose value lies in `0..=99`. The parsed
//! version is packed into a 32-bit word that compiled objects receive as a
//! preprocessor definition.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::types::{ConfigError, VersionError};

/// Release channel encoded in the top byte of the version word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionKind {
  Release,
  Prerelease,
}

impl VersionKind {
  fn from_char(c: char) -> Option<Self> {
    match c {
      'v' => Some(Self::Release),
      'p' => Some(Self::Prerelease),
      _ => None,
    }
  }

  /// Sentinel stored in bits 24..32 of the version word.
  pub fn tag(&self) -> u8 {
    match self {
      Self::Release => 0x0F,
      Self::Prerelease => 0x0A,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
  pub kind: VersionKind,
  pub major: u8,
  pub minor: u8,
  pub micro: u8,
  text: String,
}

impl Version {
  /// Parse a single version line such as `v1.2.3`.
  pub fn parse(line: &str) -> Result<Self, VersionError> {
    let line = line.trim();
    let mut chars = line.chars();
    let tag = chars.next().ok_or(VersionError::Empty)?;
    let kind = VersionKind::from_char(tag).ok_or(VersionError::UnknownType(tag))?;

    let components: Vec<&str> = chars.as_str().split('.').collect();
    let [major, minor, micro] = components.as_slice() else {
      return Err(VersionError::ComponentCount(line.to_string()));
    };

    Ok(Self {
      kind,
      major: parse_component(major)?,
      minor: parse_component(minor)?,
      micro: parse_component(micro)?,
      text: line.to_string(),
    })
  }

  /// Packed form: `micro | minor << 8 | major << 16 | tag << 24`.
  pub fn word(&self) -> u32 {
    u32::from(self.micro)
      | u32::from(self.minor) << 8
      | u32::from(self.major) << 16
      | u32::from(self.kind.tag()) << 24
  }

  /// The version as written in the file.
  pub fn text(&self) -> &str {
    &self.text
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.text)
  }
}

fn parse_component(component: &str) -> Result<u8, VersionError> {
  if component.is_empty() || component.len() > 2 || !component.chars().all(|c| c.is_ascii_hexdigit()) {
    return Err(VersionError::NotHex(component.to_string()));
  }
  let value = u8::from_str_radix(component, 16).map_err(|_| VersionError::NotHex(component.to_string()))?;
  if component.starts_with('0') && value != 0 {
    return Err(VersionError::LeadingZero(component.to_string()));
  }
  if value > 99 {
    return Err(VersionError::OutOfRange(component.to_string()));
  }
  Ok(value)
}

/// Parse VERSION file content: the first line that is neither blank nor a `#` comment.
pub fn parse_version_str(content: &str) -> Result<Version, VersionError> {
  let line = content
    .lines()
    .map(str::trim)
    .find(|line| !line.is_empty() && !line.starts_with('#'))
    .ok_or(VersionError::Empty)?;
  Version::parse(line)
}

/// Read and parse the VERSION file at `path`.
pub fn parse_version(path: &Path) -> Result<Version, ConfigError> {
  let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  parse_version_str(&content).map_err(|source| ConfigError::Version {
    path: path.to_path_buf(),
    source,
  })
}

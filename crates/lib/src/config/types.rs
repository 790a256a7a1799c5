//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a VERSION line is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
  #[error("no version line found")]
  Empty,

  #[error("unknown version type {0:?}, expected 'v' or 'p'")]
  UnknownType(char),

  #[error("expected <type><major>.<minor>.<micro>, got {0:?}")]
  ComponentCount(String),

  #[error("component {0:?} is not a hex number of one or two digits")]
  NotHex(String),

  #[error("component {0:?} has a leading zero")]
  LeadingZero(String),

  #[error("component {0:?} is outside 0..=99")]
  OutOfRange(String),
}

/// Errors that can occur while resolving the build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// A required environment variable is unset.
  #[error("{0} environment variable not set")]
  MissingEnv(&'static str),

  /// An environment variable holds a value outside its accepted set.
  #[error("{key} environment variable is invalid: {value:?}")]
  InvalidEnv { key: &'static str, value: String },

  /// A configuration file exists but could not be read.
  #[error("cannot read {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A dotfile line is neither blank, a comment, nor `KEY=VALUE`.
  #[error("{}:{line}: expected KEY=VALUE", .path.display())]
  MalformedEnvLine { path: PathBuf, line: usize },

  /// The VERSION file content is malformed.
  #[error("{} file is invalid", .path.display())]
  Version {
    path: PathBuf,
    #[source]
    source: VersionError,
  },

  /// Two spellings of a mutually exclusive flag were both given.
  #[error("flags {0} and {1} are mutually exclusive")]
  AmbiguousFlags(String, String),

  /// A value flag is the last token.
  #[error("flag {0} requires a value")]
  MissingFlagValue(String),

  /// A value flag appears more than once.
  #[error("flag {0} given more than once")]
  DuplicateFlag(String),

  /// A flag-like token survived every extraction.
  #[error("unrecognized flag {0}")]
  UnknownFlag(String),
}

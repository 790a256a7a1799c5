//! Error types for target construction and execution.

use std::path::PathBuf;

use thiserror::Error;

use crate::toolchain::ToolchainError;

/// Errors raised while constructing a target.
#[derive(Debug, Error)]
pub enum TargetError {
  /// No object name was given and none could be derived from the sources.
  #[error("cannot derive an object name from sources {0:?}")]
  NoObjectName(Vec<PathBuf>),
}

/// Errors raised while a target's action runs.
#[derive(Debug, Error)]
pub enum ActionError {
  #[error(transparent)]
  Toolchain(#[from] ToolchainError),

  #[error("cannot remove {}", .path.display())]
  Remove {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot read {}", .path.display())]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

//! Types for build execution.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::target::ActionError;

/// Errors that abort a build. None of them is recoverable: the first one
/// detected ends the run.
#[derive(Debug, Error)]
pub enum BuildError {
  /// `build` was called with an empty name list.
  #[error("no target specified")]
  NoTargets,

  /// A requested or depended-upon name is not registered.
  #[error("target {0} not found")]
  TargetNotFound(String),

  /// The build output path exists but is not a directory.
  #[error("{} is not a directory", .0.display())]
  FilesystemConflict(PathBuf),

  /// The build output directory could not be inspected or created.
  #[error("cannot create build directory {}", .path.display())]
  BuildDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A target's action failed (tool exit status or file removal).
  #[error("target {target}")]
  Action {
    target: String,
    #[source]
    source: ActionError,
  },

  /// The current dependency path leads back to a target already on it.
  #[error("dependency cycle detected: {}", .0.join(" -> "))]
  CycleDetected(Vec<String>),
}

/// What a build did, in visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  /// Targets whose dependencies were visited and whose action ran.
  pub built: Vec<String>,
  /// Targets short-circuited because their output already existed.
  pub skipped: Vec<String>,
}

impl BuildReport {
  pub fn total(&self) -> usize {
    self.built.len() + self.skipped.len()
  }
}

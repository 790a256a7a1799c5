//! Removal of build output.

use std::path::Path;

use tracing::info;

use super::types::ActionError;
use super::{ActionContext, Recipe};
use crate::consts::OBJECT_EXT;

/// Removes every file and directory tree directly under the build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanAll;

/// Removes only object files directly under the build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanObjects;

impl Recipe for CleanAll {
  fn output(&self) -> Option<&Path> {
    None
  }

  fn execute(&self, ctx: &ActionContext<'_>, _flags: &[String]) -> Result<(), ActionError> {
    clean_dir(&ctx.config.build_dir, |_, _| true)
  }
}

impl Recipe for CleanObjects {
  fn output(&self) -> Option<&Path> {
    None
  }

  fn execute(&self, ctx: &ActionContext<'_>, _flags: &[String]) -> Result<(), ActionError> {
    clean_dir(&ctx.config.build_dir, |path, is_dir| {
      !is_dir && path.extension().is_some_and(|ext| ext == OBJECT_EXT)
    })
  }
}

fn clean_dir(dir: &Path, select: impl Fn(&Path, bool) -> bool) -> Result<(), ActionError> {
  let read_err = |source| ActionError::ReadDir {
    path: dir.to_path_buf(),
    source,
  };

  for entry in std::fs::read_dir(dir).map_err(read_err)? {
    let entry = entry.map_err(read_err)?;
    let path = entry.path();
    let is_dir = entry.file_type().map_err(read_err)?.is_dir();
    if !select(&path, is_dir) {
      continue;
    }

    info!(path = %path.display(), "removing");
    let removed = if is_dir {
      std::fs::remove_dir_all(&path)
    } else {
      std::fs::remove_file(&path)
    };
    removed.map_err(|source| ActionError::Remove { path, source })?;
  }
  Ok(())
}

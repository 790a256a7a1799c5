//! Blocking child-process runner.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use super::ToolRunner;
use super::types::{Invocation, ToolchainError};

/// Runs tools as child processes that inherit stdio and block until exit.
///
/// There is no timeout: a tool that never exits stalls the build.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
  cwd: Option<PathBuf>,
  env: BTreeMap<String, String>,
}

impl ProcessRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Run every tool from `cwd`.
  pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
    self.cwd = Some(cwd.into());
    self
  }

  /// Add variables on top of the inherited environment.
  pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
    self.env = env;
    self
  }
}

impl ToolRunner for ProcessRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ToolchainError> {
    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args).envs(&self.env);
    if let Some(cwd) = &self.cwd {
      command.current_dir(cwd);
    }

    debug!(program = %invocation.program.display(), cwd = ?self.cwd, "spawning process");

    let status = command.status().map_err(|source| ToolchainError::Spawn {
      program: invocation.program.clone(),
      source,
    })?;

    if !status.success() {
      return Err(ToolchainError::Failed {
        command: invocation.to_string(),
        code: status.code(),
      });
    }
    Ok(())
  }
}

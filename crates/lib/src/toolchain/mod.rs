//! External toolchain invocation.
//!
//! A [`Toolchain`] wraps the directory holding the compiler driver and the
//! archiver. Each call is logged, runs to completion and turns a nonzero exit
//! status into an error that aborts the build.

pub mod process;
mod types;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildConfig;
use crate::consts::{AR, CC};

pub use process::ProcessRunner;
pub use types::{Invocation, LinkKind, ToolchainError};

/// Seam between argument composition and process execution.
pub trait ToolRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ToolchainError>;
}

pub struct Toolchain {
  root: PathBuf,
  runner: Box<dyn ToolRunner>,
}

impl Toolchain {
  pub fn new(root: impl Into<PathBuf>, runner: impl ToolRunner + 'static) -> Self {
    Self {
      root: root.into(),
      runner: Box::new(runner),
    }
  }

  /// Toolchain for the resolved configuration: tools run in the project root
  /// with the dotfile entries added to their environment.
  pub fn for_config(config: &BuildConfig) -> Self {
    let runner = ProcessRunner::new()
      .with_cwd(&config.project_root)
      .with_env(config.child_env.clone());
    Self::new(&config.toolchain_root, runner)
  }

  /// Run `tool` from the toolchain root with `args` verbatim.
  pub fn run(&self, tool: &str, args: Vec<String>) -> Result<(), ToolchainError> {
    let invocation = Invocation {
      program: self.root.join(tool),
      args,
    };
    info!("calling {invocation}");
    self.runner.run(&invocation)
  }

  /// Compile `sources` into the single object `output`.
  pub fn compile(&self, sources: &[PathBuf], output: &Path, flags: &[String]) -> Result<(), ToolchainError> {
    let mut args = vec!["-c".to_string()];
    args.extend(sources.iter().map(|s| s.display().to_string()));
    args.push("-o".to_string());
    args.push(output.display().to_string());
    args.extend_from_slice(flags);
    self.run(CC, args)
  }

  /// Pack `objects` into the static archive `output`.
  pub fn archive(&self, output: &Path, objects: &[PathBuf], flags: &[String]) -> Result<(), ToolchainError> {
    let mut args = vec!["rcs".to_string(), output.display().to_string()];
    args.extend(objects.iter().map(|o| o.display().to_string()));
    args.extend_from_slice(flags);
    self.run(AR, args)
  }

  /// Link `objects` into an executable or shared library at `output`.
  pub fn link(&self, kind: &LinkKind, output: &Path, objects: &[PathBuf], flags: &[String]) -> Result<(), ToolchainError> {
    let mut args = Vec::new();
    if matches!(kind, LinkKind::Shared { .. }) {
      args.push("-shared".to_string());
    }
    args.push("-o".to_string());
    args.push(output.display().to_string());
    args.extend(objects.iter().map(|o| o.display().to_string()));
    if let LinkKind::Shared {
      import_library: Some(implib),
    } = kind
    {
      args.push(format!("-Wl,--out-implib,{}", implib.display()));
    }
    args.extend_from_slice(flags);
    self.run(CC, args)
  }
}

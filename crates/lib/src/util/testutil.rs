//! Test utilities for cpbuild-lib.
//!
//! Provides a recording [`ToolRunner`] that never spawns processes, a ready
//! made [`BuildConfig`] rooted in a scratch directory, and cross-platform
//! shell helpers for the process runner tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::{BuildConfig, Version};
use crate::platform::{Bits, Os};
use crate::toolchain::{Invocation, ToolRunner, ToolchainError};

/// Records every invocation and creates the file each one would produce.
#[derive(Clone, Default)]
pub struct RecordingRunner {
  calls: Rc<RefCell<Vec<Invocation>>>,
  failing_tool: Option<String>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Make every call to `tool` exit with status 1.
  pub fn failing(mut self, tool: &str) -> Self {
    self.failing_tool = Some(tool.to_string());
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.borrow().clone()
  }

  /// The output path of each recorded call, in call order.
  pub fn outputs(&self) -> Vec<PathBuf> {
    self.calls.borrow().iter().filter_map(output_of).collect()
  }
}

impl ToolRunner for RecordingRunner {
  fn run(&self, invocation: &Invocation) -> Result<(), ToolchainError> {
    self.calls.borrow_mut().push(invocation.clone());
    if self.failing_tool.as_deref() == Some(invocation.tool().as_str()) {
      return Err(ToolchainError::Failed {
        command: invocation.to_string(),
        code: Some(1),
      });
    }
    if let Some(output) = output_of(invocation) {
      std::fs::write(&output, b"").expect("failed to create fake artifact");
    }
    Ok(())
  }
}

/// Output path of a compile, link or archive invocation.
fn output_of(invocation: &Invocation) -> Option<PathBuf> {
  let args = &invocation.args;
  if args.first().map(String::as_str) == Some("rcs") {
    return args.get(1).map(PathBuf::from);
  }
  let index = args.iter().position(|a| a == "-o")?;
  args.get(index + 1).map(PathBuf::from)
}

/// A configuration whose build directory lives under `root`.
pub fn test_config(root: &Path, os: Os) -> BuildConfig {
  BuildConfig {
    project_root: root.to_path_buf(),
    build_dir: root.join("build"),
    toolchain_root: PathBuf::from("/tc"),
    bits: Bits::B64,
    os,
    skip_exist: true,
    version: Version::parse("v1.2.3").expect("valid test version"),
    child_env: BTreeMap::new(),
  }
}

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

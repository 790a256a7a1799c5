//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Fake compiler driver: logs its arguments, creates the file after `-o`,
/// fails when `CPBUILD_FAKE_FAIL` is set.
const FAKE_GCC: &str = r#"#!/bin/sh
echo "$0 $*" >> "$CPBUILD_TEST_LOG"
if [ -n "$CPBUILD_FAKE_MARK" ]; then
  echo "mark $CPBUILD_FAKE_MARK" >> "$CPBUILD_TEST_LOG"
fi
if [ -n "$CPBUILD_FAKE_FAIL" ]; then
  exit 3
fi
out=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then
    out="$arg"
  fi
  prev="$arg"
done
if [ -n "$out" ]; then
  : > "$out"
fi
"#;

/// Fake archiver: `ar rcs <out> <objects>`.
const FAKE_AR: &str = r#"#!/bin/sh
echo "$0 $*" >> "$CPBUILD_TEST_LOG"
: > "$2"
"#;

/// Isolated project with a fake 64-bit and 32-bit toolchain.
///
/// Layout: `project/` (VERSION plus library and launcher sources),
/// `tc64/` and `tc32/` (fake tools), `calls.log` (one line per tool call).
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_file("project/VERSION", "# cp\nv1.2.3\n");
    env.write_file("project/src/path.c", "");
    env.write_file("project/src/io/file.c", "");
    env.write_file("project/src/Test/test_path.c", "");
    env.write_file("project/src/cpc/main.c", "");
    for tc in ["tc64", "tc32"] {
      env.write_script(&format!("{tc}/gcc"), FAKE_GCC);
      env.write_script(&format!("{tc}/ar"), FAKE_AR);
    }
    env
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  fn write_script(&self, relative_path: &str, content: &str) {
    self.write_file(relative_path, content);
    let path = self.temp.path().join(relative_path);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    let root = dunce::canonicalize(self.temp.path()).unwrap();
    root.join(relative_path)
  }

  pub fn project(&self) -> PathBuf {
    self.path("project")
  }

  /// Path of an artifact in the project's build directory.
  pub fn artifact(&self, name: &str) -> PathBuf {
    self.project().join("build").join(name)
  }

  /// Logged tool calls, one entry per line.
  pub fn calls(&self) -> Vec<String> {
    match std::fs::read_to_string(self.path("calls.log")) {
      Ok(log) => log.lines().map(str::to_string).collect(),
      Err(_) => Vec::new(),
    }
  }

  /// File name produced by each logged tool call, in call order.
  pub fn outputs(&self) -> Vec<String> {
    self.calls().iter().filter_map(|line| output_of(line)).collect()
  }

  /// Command for the cpbuild binary, run from the project directory.
  ///
  /// Sets `CPBUILDGCC64` and `CPBUILDGCC32` to the fake toolchains and
  /// removes every other cpbuild variable the outer environment may carry.
  pub fn cpbuild_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("cpbuild");
    cmd.current_dir(self.project());
    cmd.env("CPBUILDGCC64", self.path("tc64"));
    cmd.env("CPBUILDGCC32", self.path("tc32"));
    cmd.env("CPBUILD_TEST_LOG", self.path("calls.log"));
    for key in ["CPBUILDBIT", "CPBUILDSKIPEXIST", "CPBUILD_LOG", "CPBUILD_FAKE_FAIL", "CPBUILD_FAKE_MARK"] {
      cmd.env_remove(key);
    }
    cmd
  }
}

/// Output of one logged call: the argument after `-o`, or the archive of
/// `ar rcs <archive> ...`.
fn output_of(line: &str) -> Option<String> {
  let args: Vec<&str> = line.split_whitespace().collect();
  let path = if args.get(1) == Some(&"rcs") {
    args.get(2)?
  } else {
    let index = args.iter().position(|a| *a == "-o")?;
    args.get(index + 1)?
  };
  Path::new(path).file_name().map(|name| name.to_string_lossy().into_owned())
}

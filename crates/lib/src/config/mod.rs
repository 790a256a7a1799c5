//! Build configuration resolution.
//!
//! Settings come from three layers with fixed precedence: command-line flags,
//! then environment variables (the process environment, topped up by an
//! optional `build.env` dotfile), then built-in defaults. The VERSION file is
//! always required.

mod args;
mod env;
mod types;
mod version;

pub use args::Args;
pub use env::{Environment, resolve_skip_policy, resolve_toolchain_root};
pub use types::{ConfigError, VersionError};
pub use version::{Version, VersionKind, parse_version, parse_version_str};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::consts::{BUILD_DIR, ENV_FILE, VERSION_FILE};
use crate::platform::{Bits, Os, Platform};

pub const FLAG_64: &str = "--64";
pub const FLAG_32: &str = "--32";
pub const FLAG_SKIP_EXIST: &str = "--skip-exist";
pub const FLAG_NO_SKIP_EXIST: &str = "--no-skip-exist";
pub const FLAG_ENV_FILE: &str = "--env-file";

/// Effective configuration for one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BuildConfig {
  /// Directory relative paths are resolved against and tools run in.
  pub project_root: PathBuf,
  /// Where every artifact is written.
  pub build_dir: PathBuf,
  /// Directory holding `gcc` and `ar` for the selected width.
  pub toolchain_root: PathBuf,
  pub bits: Bits,
  pub os: Os,
  /// Treat an existing output file as an up-to-date target.
  pub skip_exist: bool,
  pub version: Version,
  /// Dotfile entries forwarded to toolchain processes.
  pub child_env: BTreeMap<String, String>,
}

impl BuildConfig {
  /// Resolve the configuration from flags in `args`, `env` and the files
  /// under `project_root`.
  ///
  /// Extraction order: `--env-file`, dotfile load, VERSION, bit width, skip
  /// policy. The tokens no extraction claimed are returned.
  pub fn resolve(args: Args, mut env: Environment, project_root: &Path) -> Result<(Self, Args), ConfigError> {
    let (env_file, args) = args.take_value(FLAG_ENV_FILE)?;
    let env_file = env_file.map_or_else(|| project_root.join(ENV_FILE), |f| project_root.join(f));
    env.load_env_file(&env_file)?;

    let version = parse_version(&project_root.join(VERSION_FILE))?;

    let (bits, args) = args.take_switch(&[(FLAG_64, Bits::B64), (FLAG_32, Bits::B32)])?;
    let (bits, toolchain_root) = resolve_toolchain_root(bits, &env, Bits::native())?;

    let (skip_exist, args) = args.take_switch(&[(FLAG_SKIP_EXIST, true), (FLAG_NO_SKIP_EXIST, false)])?;
    let skip_exist = resolve_skip_policy(skip_exist, &env);

    let config = Self {
      project_root: project_root.to_path_buf(),
      build_dir: project_root.join(BUILD_DIR),
      toolchain_root,
      bits,
      os: Os::current(),
      skip_exist,
      version,
      child_env: env.loaded().clone(),
    };

    info!(
      version = %config.version,
      platform = %config.platform(),
      skip_exist = config.skip_exist,
      "resolved build configuration"
    );

    Ok((config, args))
  }

  pub fn platform(&self) -> Platform {
    Platform::new(self.os, self.bits)
  }
}

//! Environment snapshot, dotfile loading and environment-driven settings.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::ConfigError;
use crate::consts::{ENV_BIT, ENV_GCC32, ENV_GCC64, ENV_SKIP_EXIST};
use crate::platform::Bits;

/// A snapshot of the process environment plus entries loaded from a dotfile.
///
/// Taken once at startup; resolution reads from the snapshot instead of the
/// live process environment.
#[derive(Debug, Clone, Default)]
pub struct Environment {
  vars: BTreeMap<String, String>,
  loaded: BTreeMap<String, String>,
}

impl Environment {
  /// Capture the current process environment. Non-UTF-8 entries are ignored.
  pub fn from_process() -> Self {
    let vars = std::env::vars_os()
      .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
      .collect();
    Self {
      vars,
      loaded: BTreeMap::new(),
    }
  }

  pub fn from_vars<I, K, V>(vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self {
      vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
      loaded: BTreeMap::new(),
    }
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.vars.get(key).map(String::as_str)
  }

  /// Entries that came from a dotfile rather than the process environment.
  pub fn loaded(&self) -> &BTreeMap<String, String> {
    &self.loaded
  }

  /// Load `KEY=VALUE` lines from `path`.
  ///
  /// Blank lines and `#` comments are skipped, keys already present are never
  /// overridden and a missing file is not an error. Returns how many entries
  /// were added.
  pub fn load_env_file(&mut self, path: &Path) -> Result<usize, ConfigError> {
    let content = match std::fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
      Err(source) => {
        return Err(ConfigError::Read {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    info!(path = %path.display(), "using dotfile for environment variables");

    let mut added = 0;
    for (index, line) in content.lines().enumerate() {
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }
      let Some((key, value)) = line.split_once('=').filter(|(key, _)| !key.is_empty()) else {
        return Err(ConfigError::MalformedEnvLine {
          path: path.to_path_buf(),
          line: index + 1,
        });
      };
      if self.vars.contains_key(key) {
        debug!(key, "already set, keeping existing value");
        continue;
      }
      self.vars.insert(key.to_string(), value.to_string());
      self.loaded.insert(key.to_string(), value.to_string());
      added += 1;
    }
    Ok(added)
  }

  fn require(&self, key: &'static str) -> Result<PathBuf, ConfigError> {
    self.get(key).map(PathBuf::from).ok_or(ConfigError::MissingEnv(key))
  }
}

/// Pick the toolchain root for the requested bit width.
///
/// Both roots must be configured. Precedence: explicit flag, then
/// `CPBUILDBIT`, then the width of the running process.
pub fn resolve_toolchain_root(
  flag: Option<Bits>,
  env: &Environment,
  native: Bits,
) -> Result<(Bits, PathBuf), ConfigError> {
  let root64 = env.require(ENV_GCC64)?;
  let root32 = env.require(ENV_GCC32)?;

  let bits = match flag {
    Some(bits) => bits,
    None => match env.get(ENV_BIT) {
      Some(value) => Bits::from_str_exact(value).ok_or_else(|| ConfigError::InvalidEnv {
        key: ENV_BIT,
        value: value.to_string(),
      })?,
      None => {
        info!(bits = %native, "no architecture specified, assuming current device");
        native
      }
    },
  };

  let root = match bits {
    Bits::B64 => root64,
    Bits::B32 => root32,
  };
  debug!(%bits, root = %root.display(), "resolved toolchain root");
  Ok((bits, root))
}

/// Whether existing outputs short-circuit their targets.
///
/// Precedence: explicit flag, then `CPBUILDSKIPEXIST`, then `true`. The
/// variable is false only when empty, `0` or exactly `false`.
pub fn resolve_skip_policy(flag: Option<bool>, env: &Environment) -> bool {
  if let Some(skip) = flag {
    return skip;
  }
  match env.get(ENV_SKIP_EXIST) {
    Some(value) => is_truthy(value),
    None => true,
  }
}

fn is_truthy(value: &str) -> bool {
  !(value.is_empty() || value == "0" || value == "false")
}

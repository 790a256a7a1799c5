//! Archive and link steps: static archives, shared libraries, executables.

use std::path::{Path, PathBuf};

use super::types::ActionError;
use super::{ActionContext, Recipe};
use crate::config::BuildConfig;
use crate::toolchain::LinkKind;

/// Static archive `lib<name>.a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
  objects: Vec<PathBuf>,
  output: PathBuf,
}

impl Archive {
  pub fn new(config: &BuildConfig, objects: Vec<PathBuf>, libname: &str) -> Self {
    Self {
      objects,
      output: config.build_dir.join(format!("lib{libname}.a")),
    }
  }
}

impl Recipe for Archive {
  fn output(&self) -> Option<&Path> {
    Some(&self.output)
  }

  fn execute(&self, ctx: &ActionContext<'_>, flags: &[String]) -> Result<(), ActionError> {
    ctx.toolchain.archive(&self.output, &self.objects, flags)?;
    Ok(())
  }
}

/// Dynamic library `lib<name>.so`, or `lib<name>.dll` plus an import
/// library `lib<name>.dll.a` on Windows targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedObject {
  objects: Vec<PathBuf>,
  output: PathBuf,
  import_library: Option<PathBuf>,
}

impl SharedObject {
  pub fn new(config: &BuildConfig, objects: Vec<PathBuf>, soname: &str) -> Self {
    let output = config.build_dir.join(config.os.shared_library_name(soname));
    let import_library = config.os.is_windows().then(|| {
      let mut implib = output.clone().into_os_string();
      implib.push(".a");
      PathBuf::from(implib)
    });
    Self {
      objects,
      output,
      import_library,
    }
  }

  pub fn import_library(&self) -> Option<&Path> {
    self.import_library.as_deref()
  }
}

impl Recipe for SharedObject {
  fn output(&self) -> Option<&Path> {
    Some(&self.output)
  }

  fn execute(&self, ctx: &ActionContext<'_>, flags: &[String]) -> Result<(), ActionError> {
    let kind = LinkKind::Shared {
      import_library: self.import_library.clone(),
    };
    ctx.toolchain.link(&kind, &self.output, &self.objects, flags)?;
    Ok(())
  }
}

/// Program binary `<name>` (`<name>.exe` on Windows targets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
  objects: Vec<PathBuf>,
  output: PathBuf,
}

impl Executable {
  pub fn new(config: &BuildConfig, objects: Vec<PathBuf>, exename: &str) -> Self {
    Self {
      objects,
      output: config.build_dir.join(config.os.executable_name(exename)),
    }
  }
}

impl Recipe for Executable {
  fn output(&self) -> Option<&Path> {
    Some(&self.output)
  }

  /// Libraries built alongside are found in the build directory.
  fn default_flags(&self, config: &BuildConfig) -> Vec<String> {
    vec![format!("-L{}", config.build_dir.display())]
  }

  fn execute(&self, ctx: &ActionContext<'_>, flags: &[String]) -> Result<(), ActionError> {
    ctx.toolchain.link(&LinkKind::Executable, &self.output, &self.objects, flags)?;
    Ok(())
  }
}

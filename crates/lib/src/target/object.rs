use std::path::{Path, PathBuf};

use super::types::{ActionError, TargetError};
use super::{ActionContext, Recipe};
use crate::config::BuildConfig;
use crate::consts::OBJECT_EXT;

/// One relocatable object compiled from one or more sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectFile {
  sources: Vec<PathBuf>,
  output: PathBuf,
}

impl ObjectFile {
  /// Object written to `<build dir>/<objname>`; without an explicit name the
  /// first source's stem plus `.o` is used.
  pub fn new(config: &BuildConfig, sources: Vec<PathBuf>, objname: Option<&str>) -> Result<Self, TargetError> {
    let objname = match objname {
      Some(name) => name.to_string(),
      None => sources
        .first()
        .and_then(|s| s.file_stem())
        .map(|stem| format!("{}.{OBJECT_EXT}", stem.to_string_lossy()))
        .ok_or_else(|| TargetError::NoObjectName(sources.clone()))?,
    };
    Ok(Self {
      output: config.build_dir.join(objname),
      sources,
    })
  }

  pub fn sources(&self) -> &[PathBuf] {
    &self.sources
  }
}

impl Recipe for ObjectFile {
  fn output(&self) -> Option<&Path> {
    Some(&self.output)
  }

  /// Optimization, warnings, PIC, hidden visibility and the version macros.
  fn default_flags(&self, config: &BuildConfig) -> Vec<String> {
    let version = &config.version;
    vec![
      "-O2".to_string(),
      "-Wall".to_string(),
      "-fPIC".to_string(),
      "-fvisibility=hidden".to_string(),
      format!("-DCP_VERSION_HEX={:#010X}", version.word()),
      format!("-DCP_VERSION_MAJOR={}", version.major),
      format!("-DCP_VERSION_MINOR={}", version.minor),
      format!("-DCP_VERSION_MICRO={}", version.micro),
      format!("-DCP_VERSION_TYPE={:#04X}", version.kind.tag()),
      format!("-DCP_VERSION_STRING=\"{}\"", version.text()),
    ]
  }

  fn execute(&self, ctx: &ActionContext<'_>, flags: &[String]) -> Result<(), ActionError> {
    ctx.toolchain.compile(&self.sources, &self.output, flags)?;
    Ok(())
  }
}

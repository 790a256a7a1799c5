//! Buildable targets.
//!
//! A [`Target`] pairs a unique name and a flag list with an [`Artifact`]
//! variant. Every variant except [`Artifact::Phony`] exposes a [`Recipe`]:
//! the capability to produce its artifact. Invocation composes the target's
//! own flags followed by the recipe's default flags and hands the combined
//! list to the recipe unchanged.

mod clean;
mod link;
mod object;
mod types;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::BuildConfig;
use crate::toolchain::Toolchain;

pub use clean::{CleanAll, CleanObjects};
pub use link::{Archive, Executable, SharedObject};
pub use object::ObjectFile;
pub use types::{ActionError, TargetError};

/// Everything a recipe may touch while it runs.
pub struct ActionContext<'a> {
  pub config: &'a BuildConfig,
  pub toolchain: &'a Toolchain,
}

/// Capability to produce an artifact.
pub trait Recipe {
  /// File whose existence marks the target as built, if any.
  fn output(&self) -> Option<&Path>;

  /// Flags appended after the target's own flags.
  fn default_flags(&self, _config: &BuildConfig) -> Vec<String> {
    Vec::new()
  }

  fn execute(&self, ctx: &ActionContext<'_>, flags: &[String]) -> Result<(), ActionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
  Phony,
  Object,
  Archive,
  SharedObject,
  Executable,
  CleanAll,
  CleanObjects,
}

impl ArtifactKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Phony => "Phony",
      Self::Object => "ObjectFile",
      Self::Archive => "Archive",
      Self::SharedObject => "SharedObject",
      Self::Executable => "Executable",
      Self::CleanAll => "CleanAll",
      Self::CleanObjects => "CleanObjects",
    }
  }
}

impl fmt::Display for ArtifactKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
  /// Grouping node without output or action.
  Phony,
  Object(ObjectFile),
  Archive(Archive),
  SharedObject(SharedObject),
  Executable(Executable),
  CleanAll(CleanAll),
  CleanObjects(CleanObjects),
}

impl Artifact {
  pub fn kind(&self) -> ArtifactKind {
    match self {
      Self::Phony => ArtifactKind::Phony,
      Self::Object(_) => ArtifactKind::Object,
      Self::Archive(_) => ArtifactKind::Archive,
      Self::SharedObject(_) => ArtifactKind::SharedObject,
      Self::Executable(_) => ArtifactKind::Executable,
      Self::CleanAll(_) => ArtifactKind::CleanAll,
      Self::CleanObjects(_) => ArtifactKind::CleanObjects,
    }
  }

  pub fn recipe(&self) -> Option<&dyn Recipe> {
    match self {
      Self::Phony => None,
      Self::Object(r) => Some(r),
      Self::Archive(r) => Some(r),
      Self::SharedObject(r) => Some(r),
      Self::Executable(r) => Some(r),
      Self::CleanAll(r) => Some(r),
      Self::CleanObjects(r) => Some(r),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  name: String,
  flags: Vec<String>,
  artifact: Artifact,
}

impl Target {
  pub fn new(name: impl Into<String>, artifact: Artifact) -> Self {
    Self {
      name: name.into(),
      flags: Vec::new(),
      artifact,
    }
  }

  pub fn phony(name: impl Into<String>) -> Self {
    Self::new(name, Artifact::Phony)
  }

  /// Object target named after its object file (e.g. `path.o`).
  pub fn object(config: &BuildConfig, sources: Vec<PathBuf>, objname: Option<&str>) -> Result<Self, TargetError> {
    let object = ObjectFile::new(config, sources, objname)?;
    let name = file_name(object.output());
    Ok(Self::new(name, Artifact::Object(object)))
  }

  /// Archive target named `lib<libname>.a`.
  pub fn archive(config: &BuildConfig, objects: Vec<PathBuf>, libname: &str) -> Self {
    Self::new(
      format!("lib{libname}.a"),
      Artifact::Archive(Archive::new(config, objects, libname)),
    )
  }

  /// Shared library target named `lib<soname>.so` on every platform.
  pub fn shared_object(config: &BuildConfig, objects: Vec<PathBuf>, soname: &str) -> Self {
    Self::new(
      format!("lib{soname}.so"),
      Artifact::SharedObject(SharedObject::new(config, objects, soname)),
    )
  }

  /// Executable target named `<exename>` on every platform.
  pub fn executable(config: &BuildConfig, objects: Vec<PathBuf>, exename: &str) -> Self {
    Self::new(exename, Artifact::Executable(Executable::new(config, objects, exename)))
  }

  pub fn clean_all() -> Self {
    Self::new("clean", Artifact::CleanAll(CleanAll))
  }

  pub fn clean_objects() -> Self {
    Self::new("clean-objects", Artifact::CleanObjects(CleanObjects))
  }

  pub fn named(mut self, name: impl Into<String>) -> Self {
    self.name = name.into();
    self
  }

  pub fn with_flags<I, S>(mut self, flags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.flags.extend(flags.into_iter().map(Into::into));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn flags(&self) -> &[String] {
    &self.flags
  }

  pub fn artifact(&self) -> &Artifact {
    &self.artifact
  }

  pub fn kind(&self) -> ArtifactKind {
    self.artifact.kind()
  }

  pub fn output(&self) -> Option<&Path> {
    self.artifact.recipe().and_then(|recipe| recipe.output())
  }

  /// Target flags followed by the recipe's default flags.
  pub fn effective_flags(&self, config: &BuildConfig) -> Vec<String> {
    let mut flags = self.flags.clone();
    if let Some(recipe) = self.artifact.recipe() {
      flags.extend(recipe.default_flags(config));
    }
    flags
  }

  /// Run this target's own action. Dependencies are the caller's concern.
  pub fn invoke(&self, ctx: &ActionContext<'_>) -> Result<(), ActionError> {
    let Some(recipe) = self.artifact.recipe() else {
      return Ok(());
    };
    recipe.execute(ctx, &self.effective_flags(ctx.config))
  }
}

fn file_name(path: Option<&Path>) -> String {
  path
    .and_then(Path::file_name)
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default()
}

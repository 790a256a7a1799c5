//! Build engine.
//!
//! Resolves requested target names against a [`TargetGraph`] and builds them
//! in request order. Each target is built depth-first: dependencies left to
//! right, then the target's own action.
//!
//! The only cache is the filesystem. With the skip-exist policy on, a target
//! whose output file already exists is treated as built and its dependencies
//! are not visited. Nothing else is remembered between visits, so a target
//! reachable twice is either found on disk the second time or built again.

mod types;

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::graph::TargetGraph;
use crate::target::{ActionContext, Target};
use crate::toolchain::Toolchain;

pub use types::{BuildError, BuildReport};

pub struct BuildEngine<'a> {
  graph: &'a TargetGraph,
  config: &'a BuildConfig,
  toolchain: &'a Toolchain,
}

impl<'a> BuildEngine<'a> {
  pub fn new(graph: &'a TargetGraph, config: &'a BuildConfig, toolchain: &'a Toolchain) -> Self {
    Self {
      graph,
      config,
      toolchain,
    }
  }

  /// Build every target in `names`, in order.
  ///
  /// The build directory is ensured first, then every requested name and
  /// every dependency reachable from them is resolved, and only then does
  /// building start. An unknown name therefore fails before any tool runs,
  /// even one hidden below an output that already exists.
  pub fn build<S: AsRef<str>>(&self, names: &[S]) -> Result<BuildReport, BuildError> {
    info!("building");
    ensure_build_dir(&self.config.build_dir)?;

    if names.is_empty() {
      return Err(BuildError::NoTargets);
    }

    let targets = names
      .iter()
      .map(|name| self.lookup(name.as_ref()))
      .collect::<Result<Vec<_>, _>>()?;
    self.check_reachable(&targets)?;

    let ctx = ActionContext {
      config: self.config,
      toolchain: self.toolchain,
    };
    let mut report = BuildReport::default();
    for target in targets {
      info!(target = target.name(), "building target");
      let mut path = Vec::new();
      self.build_target(target, &ctx, &mut path, &mut report)?;
    }

    info!(built = report.built.len(), skipped = report.skipped.len(), "build completed successfully");
    Ok(report)
  }

  fn lookup(&self, name: &str) -> Result<&'a Target, BuildError> {
    self
      .graph
      .get(name)
      .ok_or_else(|| BuildError::TargetNotFound(name.to_string()))
  }

  /// Resolve every dependency edge reachable from `roots`, each target once.
  fn check_reachable(&self, roots: &[&'a Target]) -> Result<(), BuildError> {
    let mut seen: HashSet<&str> = roots.iter().map(|t| t.name()).collect();
    let mut pending: Vec<&str> = roots.iter().map(|t| t.name()).collect();
    while let Some(name) = pending.pop() {
      for dependency in self.graph.dependencies(name) {
        let dependency = self.lookup(dependency)?;
        if seen.insert(dependency.name()) {
          pending.push(dependency.name());
        }
      }
    }
    Ok(())
  }

  /// `path` holds the names on the current recursion path, for cycle detection.
  fn build_target(
    &self,
    target: &'a Target,
    ctx: &ActionContext<'_>,
    path: &mut Vec<&'a str>,
    report: &mut BuildReport,
  ) -> Result<(), BuildError> {
    let name = target.name();

    if self.config.skip_exist
      && let Some(output) = target.output()
      && output.exists()
    {
      info!(target = name, output = %output.display(), "already exists, skipping");
      report.skipped.push(name.to_string());
      return Ok(());
    }

    if let Some(start) = path.iter().position(|n| *n == name) {
      let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
      cycle.push(name.to_string());
      return Err(BuildError::CycleDetected(cycle));
    }

    path.push(name);
    for dependency in self.graph.dependencies(name) {
      debug!(target = name, dependency = %dependency, "building dependency");
      let dependency = self.lookup(dependency)?;
      self.build_target(dependency, ctx, path, report)?;
    }
    path.pop();

    target.invoke(ctx).map_err(|source| BuildError::Action {
      target: name.to_string(),
      source,
    })?;
    report.built.push(name.to_string());
    Ok(())
  }
}

fn ensure_build_dir(dir: &Path) -> Result<(), BuildError> {
  match std::fs::metadata(dir) {
    Ok(meta) if meta.is_dir() => Ok(()),
    Ok(_) => Err(BuildError::FilesystemConflict(dir.to_path_buf())),
    Err(e) if e.kind() == ErrorKind::NotFound => {
      info!(path = %dir.display(), "build directory does not exist, creating");
      std::fs::create_dir_all(dir).map_err(|source| BuildError::BuildDir {
        path: dir.to_path_buf(),
        source,
      })
    }
    Err(source) => Err(BuildError::BuildDir {
      path: dir.to_path_buf(),
      source,
    }),
  }
}

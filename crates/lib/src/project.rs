//! The cp project's target graph.
//!
//! Library objects come from every C source under `src/` except the launcher
//! directory and test directories. They link into one versioned shared
//! library; the launcher, when present, links against it.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::config::BuildConfig;
use crate::consts::{LAUNCHER_DIR, SOURCE_EXT, SRC_DIR, TEST_DIR};
use crate::graph::{GraphError, TargetGraph};
use crate::target::{Target, TargetError};

/// Name of the shared library target.
pub const LIBRARY_TARGET: &str = "cp.so";

/// Name of the launcher executable target.
pub const LAUNCHER_TARGET: &str = "cp";

/// Name of the aggregate target.
pub const ALL_TARGET: &str = "all";

#[derive(Debug, Error)]
pub enum ProjectError {
  #[error(transparent)]
  Graph(#[from] GraphError),

  #[error(transparent)]
  Target(#[from] TargetError),

  #[error("cannot scan {}", .path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

/// Assemble the graph for the project at `config.project_root`.
pub fn cp_project(config: &BuildConfig) -> Result<TargetGraph, ProjectError> {
  let root = &config.project_root;
  let src = root.join(SRC_DIR);
  let launcher = src.join(LAUNCHER_DIR);
  let mut graph = TargetGraph::new();

  let library_sources = find_sources(root, &src, |path| {
    path == launcher || path.file_name().is_some_and(|name| name == TEST_DIR)
  })?;
  let library_objects = add_objects(&mut graph, config, &library_sources, None)?;

  let soname = format!("cp_v{}", config.version.major);
  let library = Target::shared_object(config, outputs(&graph, &library_objects), &soname).named(LIBRARY_TARGET);
  graph.add_with_dependencies(library, &library_objects)?;

  let launcher_sources = if launcher.is_dir() {
    find_sources(root, &launcher, |path| path != launcher)?
  } else {
    Vec::new()
  };
  if !launcher_sources.is_empty() {
    let launcher_objects = add_objects(&mut graph, config, &launcher_sources, Some("cpc"))?;
    let executable = Target::executable(config, outputs(&graph, &launcher_objects), LAUNCHER_TARGET)
      .with_flags([format!("-l{soname}")]);
    let dependencies = std::iter::once(LIBRARY_TARGET.to_string()).chain(launcher_objects);
    graph.add_with_dependencies(executable, dependencies)?;
  }

  let everything: Vec<String> = graph.names().into_iter().map(str::to_string).collect();
  graph.add_with_dependencies(Target::phony(ALL_TARGET), everything)?;
  graph.add(Target::clean_all())?;
  graph.add(Target::clean_objects())?;

  debug!(targets = graph.len(), "assembled project graph");
  Ok(graph)
}

/// Sorted `.c` files under `dir`, relative to `root`. Directories for which
/// `skip` holds are not descended into.
fn find_sources(root: &Path, dir: &Path, skip: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>, ProjectError> {
  if !dir.is_dir() {
    return Ok(Vec::new());
  }

  let walker = WalkDir::new(dir)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| !(e.file_type().is_dir() && skip(e.path())));

  let mut sources = Vec::new();
  for entry in walker {
    let entry = entry.map_err(|source| ProjectError::Walk {
      path: dir.to_path_buf(),
      source,
    })?;
    let path = entry.path();
    if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == SOURCE_EXT) {
      sources.push(path.strip_prefix(root).unwrap_or(path).to_path_buf());
    }
  }
  Ok(sources)
}

/// Register one object per source and return the target names.
fn add_objects(
  graph: &mut TargetGraph,
  config: &BuildConfig,
  sources: &[PathBuf],
  prefix: Option<&str>,
) -> Result<Vec<String>, ProjectError> {
  let mut names = Vec::with_capacity(sources.len());
  for source in sources {
    let objname = match (prefix, source.file_stem()) {
      (Some(prefix), Some(stem)) => Some(format!("{prefix}-{}.o", stem.to_string_lossy())),
      _ => None,
    };
    let target = Target::object(config, vec![source.clone()], objname.as_deref())?;
    names.push(target.name().to_string());
    graph.add(target)?;
  }
  Ok(names)
}

fn outputs(graph: &TargetGraph, names: &[String]) -> Vec<PathBuf> {
  names
    .iter()
    .filter_map(|name| graph.get(name).and_then(Target::output))
    .map(Path::to_path_buf)
    .collect()
}

//! Registry of uniquely named targets and their dependency edges.
//!
//! Edges are stored by name in the graph, not on the targets, and are only
//! resolved when the build engine walks them. A dependency on a name that was
//! never registered therefore surfaces as `TargetNotFound` at build time.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::target::{ArtifactKind, Target};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
  #[error("target {0} already registered")]
  DuplicateTarget(String),

  #[error("target {0} not found")]
  TargetNotFound(String),
}

#[derive(Debug, Default)]
pub struct TargetGraph {
  targets: Vec<Target>,
  index: HashMap<String, usize>,
  edges: Vec<Vec<String>>,
}

impl TargetGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a target with no dependencies.
  pub fn add(&mut self, target: Target) -> Result<(), GraphError> {
    self.add_with_dependencies(target, Vec::<String>::new())
  }

  /// Register a target together with its ordered dependency names.
  pub fn add_with_dependencies<I, S>(&mut self, target: Target, dependencies: I) -> Result<(), GraphError>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    if self.index.contains_key(target.name()) {
      return Err(GraphError::DuplicateTarget(target.name().to_string()));
    }
    self.index.insert(target.name().to_string(), self.targets.len());
    self.targets.push(target);
    self.edges.push(dependencies.into_iter().map(Into::into).collect());
    Ok(())
  }

  /// Append `dependency` to the dependency list of the registered `target`.
  pub fn add_dependency(&mut self, target: &str, dependency: impl Into<String>) -> Result<(), GraphError> {
    let &id = self
      .index
      .get(target)
      .ok_or_else(|| GraphError::TargetNotFound(target.to_string()))?;
    self.edges[id].push(dependency.into());
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&Target> {
    self.index.get(name).map(|&id| &self.targets[id])
  }

  pub fn contains(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  /// Dependency names of `name` in declaration order; empty for unknown names.
  pub fn dependencies(&self, name: &str) -> &[String] {
    self.index.get(name).map(|&id| self.edges[id].as_slice()).unwrap_or_default()
  }

  pub fn len(&self) -> usize {
    self.targets.len()
  }

  pub fn is_empty(&self) -> bool {
    self.targets.is_empty()
  }

  /// Registered targets in registration order.
  pub fn iter(&self) -> impl Iterator<Item = TargetEntry<'_>> {
    self.targets.iter().zip(&self.edges).map(|(target, dependencies)| TargetEntry {
      target,
      dependencies,
    })
  }

  /// Names in registration order.
  pub fn names(&self) -> Vec<&str> {
    self.targets.iter().map(Target::name).collect()
  }

  pub fn summaries(&self) -> Vec<TargetSummary> {
    self.iter().map(TargetSummary::from).collect()
  }
}

/// A target viewed together with its dependency list.
#[derive(Debug, Clone, Copy)]
pub struct TargetEntry<'a> {
  pub target: &'a Target,
  pub dependencies: &'a [String],
}

impl fmt::Display for TargetEntry<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.target.kind(), self.target.name())?;
    if !self.dependencies.is_empty() {
      write!(f, ": {}", self.dependencies.join(" "))?;
    }
    if let Some(output) = self.target.output() {
      write!(f, " -> {}", output.display())?;
    }
    Ok(())
  }
}

/// Serializable description of a registered target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSummary {
  pub name: String,
  pub kind: ArtifactKind,
  pub output: Option<PathBuf>,
  pub dependencies: Vec<String>,
}

impl From<TargetEntry<'_>> for TargetSummary {
  fn from(entry: TargetEntry<'_>) -> Self {
    Self {
      name: entry.target.name().to_string(),
      kind: entry.target.kind(),
      output: entry.target.output().map(PathBuf::from),
      dependencies: entry.dependencies.to_vec(),
    }
  }
}

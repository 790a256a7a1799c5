mod build;
mod list;

pub use build::cmd_build;
pub use list::cmd_list;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use cpbuild_lib::config::{Args, BuildConfig, Environment};
use cpbuild_lib::graph::TargetGraph;
use cpbuild_lib::project::cp_project;

/// Everything a command needs after the trailing tokens are interpreted.
struct Loaded {
  config: BuildConfig,
  graph: TargetGraph,
  targets: Vec<String>,
}

/// Resolve the configuration from `tokens` and the process environment, then
/// assemble the project graph.
fn load(root: &Path, tokens: Vec<String>) -> Result<Loaded> {
  let (config, rest) = BuildConfig::resolve(Args::new(tokens), Environment::from_process(), root)
    .context("cannot resolve build configuration")?;
  let targets = rest.into_targets().context("cannot resolve build configuration")?;
  debug!(platform = %config.platform(), skip_exist = config.skip_exist, "configuration resolved");

  let graph = cp_project(&config).context("cannot assemble project targets")?;
  Ok(Loaded { config, graph, targets })
}

//! Implementation of the default build command.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;

use cpbuild_lib::build::{BuildEngine, BuildReport};
use cpbuild_lib::platform::Platform;
use cpbuild_lib::toolchain::Toolchain;

use crate::output::{OutputFormat, format_duration, print_json, print_stat, print_success};

#[derive(Serialize)]
struct BuildOutput<'a> {
  platform: String,
  version: &'a str,
  build_dir: &'a Path,
  #[serde(flatten)]
  report: &'a BuildReport,
  duration_ms: u128,
}

/// Build the requested targets and print a summary.
pub fn cmd_build(root: &Path, tokens: Vec<String>, format: OutputFormat) -> Result<()> {
  let loaded = super::load(root, tokens)?;
  let toolchain = Toolchain::for_config(&loaded.config);
  let engine = BuildEngine::new(&loaded.graph, &loaded.config, &toolchain);

  let start = Instant::now();
  let report = engine.build(loaded.targets.as_slice())?;
  let elapsed = start.elapsed();

  if format.is_json() {
    print_json(&BuildOutput {
      platform: loaded.config.platform().to_string(),
      version: loaded.config.version.text(),
      build_dir: &loaded.config.build_dir,
      report: &report,
      duration_ms: elapsed.as_millis(),
    })?;
  } else {
    print_summary(&report, loaded.config.platform(), &loaded.config.build_dir, elapsed);
  }
  Ok(())
}

fn print_summary(report: &BuildReport, platform: Platform, build_dir: &Path, elapsed: Duration) {
  print_success(&format!(
    "Built {} target(s) for {} in {}",
    report.built.len(),
    platform,
    format_duration(elapsed)
  ));
  print_stat("Visited", &report.total().to_string());
  print_stat("Built", &report.built.len().to_string());
  print_stat("Skipped", &report.skipped.len().to_string());
  print_stat("Output", &build_dir.display().to_string());
}

//! Implementation of `cpbuild --list`.

use std::path::Path;

use anyhow::Result;

use crate::output::{OutputFormat, print_info, print_json, print_warning, symbols};

/// Print every registered target in registration order.
pub fn cmd_list(root: &Path, tokens: Vec<String>, format: OutputFormat) -> Result<()> {
  let loaded = super::load(root, tokens)?;
  if !loaded.targets.is_empty() {
    print_warning(&format!("--list ignores target names: {}", loaded.targets.join(" ")));
  }

  if format.is_json() {
    return print_json(&loaded.graph.summaries());
  }

  print_info(&format!(
    "{} target(s) for {}",
    loaded.graph.len(),
    loaded.config.platform()
  ));
  for entry in loaded.graph.iter() {
    println!("  {} {}", symbols::ARROW, entry);
  }
  Ok(())
}

//! cpbuild: build the cp project with an external C toolchain.

mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::{OutputFormat, print_error};

/// Environment variable overriding the log filter set by -v/-q.
const LOG_ENV: &str = "CPBUILD_LOG";

/// Build the cp project.
///
/// Trailing tokens are target names mixed with the build flags --64, --32,
/// --skip-exist, --no-skip-exist and --env-file PATH. Options of cpbuild
/// itself must come before the first token: `cpbuild all -v` rejects -v.
#[derive(Parser)]
#[command(name = "cpbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Log every resolution step
  #[arg(short, long)]
  verbose: bool,

  /// Only log warnings and errors
  #[arg(short, long, conflicts_with = "verbose")]
  quiet: bool,

  /// Project root (default: current directory)
  #[arg(short = 'C', long = "directory", value_name = "DIR")]
  directory: Option<PathBuf>,

  /// List the registered targets instead of building
  #[arg(long)]
  list: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t)]
  output: OutputFormat,

  /// Target names and build flags (cpbuild options go before these)
  #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
  tokens: Vec<String>,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose, cli.quiet);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}

fn run(cli: Cli) -> Result<()> {
  let dir = cli.directory.unwrap_or_else(|| PathBuf::from("."));
  let root = dunce::canonicalize(&dir).with_context(|| format!("cannot open project directory {}", dir.display()))?;

  if cli.list {
    cmd::cmd_list(&root, cli.tokens, cli.output)
  } else {
    cmd::cmd_build(&root, cli.tokens, cli.output)
  }
}

fn init_tracing(verbose: bool, quiet: bool) {
  let default = if verbose {
    "debug"
  } else if quiet {
    "warn"
  } else {
    "info"
  };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}

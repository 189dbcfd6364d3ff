mod args;
mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use args::HarnessArgs;
use cmd::{Expect, cmd_apply, cmd_catalog, cmd_check, cmd_roundtrip, cmd_run, cmd_validate};
use output::OutputFormat;

/// ucconfig-e2e - End-to-end tests for the ucconfig config engine
#[derive(Parser)]
#[command(name = "ucconfig-e2e")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(flatten)]
  harness: HarnessArgs,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the full scenario: create, modify and delete resources on the target
  Run {
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Check manifests without running the engine (all scenario manifests by default)
  Validate {
    manifests: Vec<PathBuf>,
  },

  /// Apply a manifest to the target
  Apply {
    manifest: PathBuf,

    /// Require every resource type to show this outcome
    #[arg(long, value_enum)]
    expect: Option<Expect>,
  },

  /// Dry-run a manifest and fail unless nothing would change
  Check {
    manifest: PathBuf,
  },

  /// Regenerate a manifest from the target and compare it with the original
  Roundtrip {
    manifest: PathBuf,
  },

  /// List the resource types the scenario must cover
  Catalog {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Run { output } => cmd_run(&cli.harness, output),
    Commands::Validate { manifests } => cmd_validate(&cli.harness, &manifests),
    Commands::Apply { manifest, expect } => cmd_apply(&cli.harness, &manifest, expect),
    Commands::Check { manifest } => cmd_check(&cli.harness, &manifest),
    Commands::Roundtrip { manifest } => cmd_roundtrip(&cli.harness, &manifest),
    Commands::Catalog { json } => cmd_catalog(&cli.harness, json),
  }
}

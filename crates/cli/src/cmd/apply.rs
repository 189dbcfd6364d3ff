//! Implementation of the `ucconfig-e2e apply` command.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use ucconfig_e2e_lib::Harness;
use ucconfig_e2e_lib::converge::Outcome;

use crate::args::{HarnessArgs, resolve_manifest};
use crate::output::print_success;

/// Coverage expectation for the apply output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Expect {
  /// Every resource type is created
  Created,
  /// Every resource type is updated or replaced
  Changed,
}

impl Expect {
  fn outcomes(self) -> &'static [Outcome] {
    match self {
      Expect::Created => &[Outcome::Created],
      Expect::Changed => &[Outcome::Updated, Outcome::Replaced],
    }
  }
}

pub fn cmd_apply(args: &HarnessArgs, manifest: &Path, expect: Option<Expect>) -> Result<()> {
  let config = args.config();
  let path = resolve_manifest(&config, manifest);
  let harness = Harness::new(config).context("Failed to set up harness")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let output = rt
    .block_on(harness.apply(&path))
    .with_context(|| format!("Failed to apply {}", path.display()))?;

  if let Some(expect) = expect {
    harness
      .assert_all_types_covered(&output, expect.outcomes())
      .context("Coverage check failed")?;
  }

  print_success(&format!("Applied {}", path.display()));
  Ok(())
}

//! Implementation of the `ucconfig-e2e check` command.
//!
//! Dry-runs a manifest and fails unless the engine reports no changes.

use std::path::Path;

use anyhow::{Context, Result};

use ucconfig_e2e_lib::Harness;

use crate::args::{HarnessArgs, resolve_manifest};
use crate::output::print_success;

pub fn cmd_check(args: &HarnessArgs, manifest: &Path) -> Result<()> {
  let config = args.config();
  let path = resolve_manifest(&config, manifest);
  let harness = Harness::new(config).context("Failed to set up harness")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(harness.assert_no_changes(&path))
    .with_context(|| format!("Dry run of {} reported changes or failed", path.display()))?;

  print_success(&format!("{} matches the target", path.display()));
  Ok(())
}

//! Implementation of the `ucconfig-e2e roundtrip` command.

use std::path::Path;

use anyhow::{Context, Result};

use ucconfig_e2e_lib::Harness;

use crate::args::{HarnessArgs, resolve_manifest};
use crate::output::print_success;

pub fn cmd_roundtrip(args: &HarnessArgs, manifest: &Path) -> Result<()> {
  let config = args.config();
  let path = resolve_manifest(&config, manifest);
  let harness = Harness::new(config).context("Failed to set up harness")?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  rt.block_on(harness.assert_generate_matches(&path))
    .with_context(|| format!("gen-manifest did not reproduce {}", path.display()))?;

  print_success(&format!("gen-manifest reproduced {}", path.display()));
  Ok(())
}

//! Implementation of the `ucconfig-e2e catalog` command.

use anyhow::{Context, Result};

use ucconfig_e2e_lib::Harness;

use crate::args::HarnessArgs;
use crate::output::{print_info, print_json};

pub fn cmd_catalog(args: &HarnessArgs, json: bool) -> Result<()> {
  let harness = Harness::new(args.config()).context("Failed to load resource type catalog")?;
  let catalog = harness.catalog();

  if json {
    let suffixes: Vec<&str> = catalog.iter().collect();
    print_json(&suffixes)?;
    return Ok(());
  }

  for suffix in catalog.iter() {
    print_info(suffix);
  }
  Ok(())
}

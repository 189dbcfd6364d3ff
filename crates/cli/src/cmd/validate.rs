//! Implementation of the `ucconfig-e2e validate` command.
//!
//! Checks manifests offline: known resource types, manifest ids, and the
//! target placeholder in every resource's `resource_uuids`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use ucconfig_e2e_lib::Harness;
use ucconfig_e2e_lib::manifest::validate;
use ucconfig_e2e_lib::scenario::Scenario;

use crate::args::{HarnessArgs, resolve_manifest};
use crate::output::{print_error, print_success};

/// Validate `manifests`, or every scenario manifest when none are given.
pub fn cmd_validate(args: &HarnessArgs, manifests: &[PathBuf]) -> Result<()> {
  let config = args.config();
  let harness = Harness::new(config.clone()).context("Failed to set up harness")?;

  let paths: Vec<PathBuf> = if manifests.is_empty() {
    Scenario::standard()
      .manifests()
      .into_iter()
      .map(|name| config.manifest_path(name))
      .collect()
  } else {
    manifests.iter().map(|m| resolve_manifest(&config, m)).collect()
  };

  let mut failures = 0;
  for path in &paths {
    match validate(path, Some(harness.catalog())) {
      Ok(manifest) => print_success(&format!(
        "{} ({} resources)",
        path.display(),
        manifest.resources.len()
      )),
      Err(e) => {
        print_error(&format!("{}: {}", path.display(), e));
        failures += 1;
      }
    }
  }

  if failures > 0 {
    bail!("{} of {} manifests failed validation", failures, paths.len());
  }
  Ok(())
}

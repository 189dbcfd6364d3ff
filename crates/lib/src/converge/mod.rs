//! Convergence checks.
//!
//! Apply a manifest for real, or dry-run it and require the engine to report
//! that nothing would change. Both validate the manifest first and run the
//! engine against a templated copy that is removed afterwards.

mod classify;

pub use classify::{Outcome, OutcomeClassifier, PhraseClassifier};

use std::path::Path;

use tracing::info;

use crate::config::TargetIdentity;
use crate::coverage::Catalog;
use crate::engine::{ApplyMode, Engine};
use crate::error::{HarnessError, Result};
use crate::manifest::{TemplatedManifest, validate};

/// Validate, template and apply `manifest` in the given mode.
pub async fn apply_templated(
  engine: &Engine,
  target: &TargetIdentity,
  catalog: Option<&Catalog>,
  manifest: &Path,
  mode: ApplyMode,
) -> Result<String> {
  validate(manifest, catalog)?;
  let templated = TemplatedManifest::acquire(manifest, target)?;
  // On error the guard is dropped here and the copy deleted.
  let output = engine.apply(templated.path(), mode).await?;
  templated.release()?;
  Ok(output)
}

/// Apply `manifest`, mutating the target.
pub async fn apply(engine: &Engine, target: &TargetIdentity, catalog: Option<&Catalog>, manifest: &Path) -> Result<String> {
  apply_templated(engine, target, catalog, manifest, ApplyMode::AutoApprove).await
}

/// Dry-run `manifest` and fail unless the engine reports no changes.
pub async fn assert_no_changes(
  engine: &Engine,
  target: &TargetIdentity,
  catalog: Option<&Catalog>,
  manifest: &Path,
  sentinel: &str,
) -> Result<String> {
  let output = apply_templated(engine, target, catalog, manifest, ApplyMode::DryRun).await?;
  check_no_changes(&output, sentinel, manifest)?;
  info!(manifest = %manifest.display(), "no changes");
  Ok(output)
}

/// Literal substring check for the no-changes sentinel.
pub fn check_no_changes(output: &str, sentinel: &str, manifest: &Path) -> Result<()> {
  if output.contains(sentinel) {
    Ok(())
  } else {
    Err(HarnessError::UnexpectedDiff {
      manifest: manifest.to_path_buf(),
    })
  }
}

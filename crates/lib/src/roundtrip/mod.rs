//! Round-trip comparison.
//!
//! Regenerates a manifest from live state into a scratch directory and checks
//! that it reproduces the (templated) original byte-for-byte, along with its
//! value-file directory. Every discrepancy is collected and printed before the
//! check fails.

mod report;

pub use report::{ComparisonReport, Discrepancy};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::TargetIdentity;
use crate::consts::VALUES_DIR_SUFFIX;
use crate::engine::Engine;
use crate::error::{HarnessError, Result};
use crate::manifest::TemplatedManifest;
use crate::process::{self, Echo};

/// Name of the value-file directory that accompanies `manifest`.
pub fn values_dir_name(manifest: &Path) -> String {
  let stem = manifest.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
  format!("{stem}{VALUES_DIR_SUFFIX}")
}

/// Run gen-manifest and require it to reproduce `manifest` and its value files.
pub async fn assert_generate_matches(engine: &Engine, target: &TargetIdentity, manifest: &Path) -> Result<()> {
  let report = generate_and_compare(engine, target, manifest).await?;
  if report.differs() {
    println!("{report}");
    return Err(HarnessError::RoundTripMismatch {
      discrepancies: report.len(),
    });
  }
  info!(manifest = %manifest.display(), "gen-manifest reproduced the manifest");
  Ok(())
}

/// Run gen-manifest into a scratch directory and compare, without failing.
pub async fn generate_and_compare(engine: &Engine, target: &TargetIdentity, manifest: &Path) -> Result<ComparisonReport> {
  let file_name = manifest.file_name().ok_or_else(|| HarnessError::Parse {
    path: manifest.to_path_buf(),
    message: "manifest path has no file name".to_string(),
  })?;
  let scratch = TempDir::new().map_err(|e| HarnessError::io(std::env::temp_dir(), e))?;
  let generated = scratch.path().join(file_name);

  engine.gen_manifest(&generated).await?;

  let templated = TemplatedManifest::acquire(manifest, target)?;
  let values = values_dir_name(manifest);
  let original_values = manifest.parent().unwrap_or(Path::new(".")).join(&values);
  let generated_values = scratch.path().join(&values);

  let report = compare(
    templated.path(),
    &generated,
    &original_values,
    &generated_values,
    &values,
  )
  .await?;
  templated.release()?;
  Ok(report)
}

/// Compare an expected manifest and value directory against generated ones.
///
/// `values_label` prefixes value-file paths in the report.
pub async fn compare(
  expected_manifest: &Path,
  generated_manifest: &Path,
  expected_values: &Path,
  generated_values: &Path,
  values_label: &str,
) -> Result<ComparisonReport> {
  let mut report = ComparisonReport::default();

  let expected = read(expected_manifest)?;
  let actual = read(generated_manifest)?;
  if expected != actual {
    let diff = unified_diff(expected_manifest, generated_manifest).await;
    report.push(Discrepancy::ManifestModified { diff });
  }

  let expected_files = list_files(expected_values)?;
  let generated_files = list_files(generated_values)?;
  for rel in expected_files.difference(&generated_files) {
    report.push(Discrepancy::ValueFileDeleted {
      path: label(values_label, rel),
    });
  }
  for rel in generated_files.difference(&expected_files) {
    report.push(Discrepancy::ValueFileCreated {
      path: label(values_label, rel),
    });
  }
  for rel in expected_files.intersection(&generated_files) {
    let a = expected_values.join(rel);
    let b = generated_values.join(rel);
    if read(&a)? != read(&b)? {
      let diff = unified_diff(&a, &b).await;
      report.push(Discrepancy::ValueFileModified {
        path: label(values_label, rel),
        diff,
      });
    }
  }

  debug!(discrepancies = report.len(), "comparison finished");
  Ok(report)
}

fn read(path: &Path) -> Result<Vec<u8>> {
  std::fs::read(path).map_err(|e| HarnessError::io(path, e))
}

fn label(values_label: &str, rel: &Path) -> String {
  format!("{}/{}", values_label, rel.display())
}

/// Relative paths of all regular files under `dir`. A missing directory is empty.
fn list_files(dir: &Path) -> Result<BTreeSet<PathBuf>> {
  let mut files = BTreeSet::new();
  if !dir.exists() {
    return Ok(files);
  }
  for entry in WalkDir::new(dir) {
    let entry = entry.map_err(|e| {
      let path = e.path().unwrap_or(dir).to_path_buf();
      HarnessError::io(path, e.into())
    })?;
    if entry.file_type().is_file() {
      if let Ok(rel) = entry.path().strip_prefix(dir) {
        files.insert(rel.to_path_buf());
      }
    }
  }
  Ok(files)
}

/// `diff -u` output for two files, or a note when the tool is unavailable.
async fn unified_diff(a: &Path, b: &Path) -> String {
  let args = [Path::new("-u"), a, b];
  match process::run_unchecked("diff", args, Echo::Silent).await {
    // diff exits 1 when the inputs differ, 2 on trouble.
    Ok(out) if out.status.code() == Some(1) => out.text,
    Ok(out) => format!("(diff unavailable: exit code {:?})\n{}", out.status.code(), out.text),
    Err(e) => format!("(diff unavailable: {e})\n"),
  }
}

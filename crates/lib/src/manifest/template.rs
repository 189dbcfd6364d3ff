//! Templated manifest copies.
//!
//! A [`TemplatedManifest`] is a sibling of the original manifest with every
//! placeholder token replaced by the target identity. The copy lives exactly
//! as long as the guard: dropping it, including while unwinding an error,
//! deletes the file.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::TargetIdentity;
use crate::consts::{TARGET_FQTN_PLACEHOLDER, TEMPLATED_MARKER};
use crate::error::{HarnessError, Result};

/// Replace every placeholder occurrence in `text` with the target identity.
pub fn substitute_placeholder(text: &str, target: &TargetIdentity) -> String {
  text.replace(TARGET_FQTN_PLACEHOLDER, target.as_str())
}

/// Scoped, templated copy of a manifest.
#[derive(Debug)]
pub struct TemplatedManifest {
  file: NamedTempFile,
  contents: String,
}

impl TemplatedManifest {
  /// Write the templated copy next to `original`.
  ///
  /// The copy is named `<stem>.substituted-tmp.<random>.<ext>` so it keeps the
  /// original's extension (the engine picks the format from it) and sits in
  /// the same directory (relative value-file references still resolve).
  pub fn acquire(original: &Path, target: &TargetIdentity) -> Result<Self> {
    let text = std::fs::read_to_string(original).map_err(|e| HarnessError::io(original, e))?;
    let contents = substitute_placeholder(&text, target);

    let dir = match original.parent() {
      Some(p) if !p.as_os_str().is_empty() => p,
      _ => Path::new("."),
    };
    let stem = original.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let suffix = original
      .extension()
      .map(|e| format!(".{}", e.to_string_lossy()))
      .unwrap_or_default();

    let mut file = tempfile::Builder::new()
      .prefix(&format!("{stem}{TEMPLATED_MARKER}"))
      .suffix(&suffix)
      .tempfile_in(dir)
      .map_err(|e| HarnessError::io(dir, e))?;
    file
      .write_all(contents.as_bytes())
      .and_then(|_| file.flush())
      .map_err(|e| HarnessError::io(file.path(), e))?;

    debug!(original = %original.display(), templated = %file.path().display(), target = %target, "templated manifest");
    Ok(Self {
      file,
      contents,
    })
  }

  /// Path of the templated copy.
  pub fn path(&self) -> &Path {
    self.file.path()
  }

  /// Templated manifest text.
  pub fn contents(&self) -> &str {
    &self.contents
  }

  /// Delete the copy now, reporting any failure instead of ignoring it.
  pub fn release(self) -> Result<()> {
    let path = self.file.path().to_path_buf();
    self.file.close().map_err(|e| HarnessError::io(path, e))
  }
}
